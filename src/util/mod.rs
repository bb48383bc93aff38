// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Helpers shared by the encoder and decoder: the character dictionary that
//! gives every ideograph its 12-bit code, and the name cleaning that runs
//! before a name ever reaches the classifier.

pub mod char_table;
pub mod normalize;
