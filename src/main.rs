use std::fs;
use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use region_cn::{
    decode_records, load_dataset, pack, search, ArtifactLayout, RegionTrie, Result,
};

mod cli;
use cli::display::{
    discarded_badge, format_size, pad_left, pad_right, row, savings_colored, section_badge,
    section_bot, section_mid, section_top, themed, title, BOLD, CYAN, DIM, GRAY, GREEN,
};
use cli::{Cli, Commands};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Pack {
            input,
            output,
            stamp,
        } => run_pack(&input, &output, stamp),
        Commands::Search {
            file,
            code,
            json,
            trie,
        } => run_search(&file, &code, json, trie),
        Commands::Inspect { file } => run_inspect(&file),
        Commands::Dump { file, json } => run_dump(&file, json),
    };

    if let Err(e) = outcome {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

/// Seconds since the epoch, truncated to the 32-bit stamp field.
fn default_stamp() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .unwrap_or(0)
}

fn run_pack(input: &str, output: &str, stamp: Option<u32>) -> Result<()> {
    let dataset = load_dataset(input)?;
    let version = stamp.or(dataset.version).unwrap_or_else(default_stamp);
    let summary = pack(output, &dataset.records, version)?;

    eprintln!("✅ Packed {}", output);
    eprintln!(
        "   {} records │ {} provinces │ {} characters │ {}",
        summary.record_count,
        summary.province_count,
        summary.char_count,
        format_size(summary.total_len)
    );
    eprintln!("   version {}", summary.version);
    Ok(())
}

fn run_search(file: &str, code: &str, json: bool, trie: bool) -> Result<()> {
    let lookup = if trie {
        RegionTrie::load(file)?.search(code)?
    } else {
        search(file, code)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&lookup)?);
        return Ok(());
    }

    if lookup.is_empty() {
        eprintln!("⚠️  {}: no data", code);
        return Ok(());
    }

    println!("{}", themed(CYAN, &[BOLD], &lookup.chain));
    let path = lookup.ancestors.join(&themed(GRAY, &[], " › "));
    println!("{}  {}", themed(GRAY, &[], code), path);
    if !lookup.matched {
        eprintln!("⚠️  {} itself is not in the table; showing its nearest ancestors", code);
    }
    Ok(())
}

fn brotli_size(bytes: &[u8]) -> Result<usize> {
    let mut compressed = Vec::new();
    {
        let mut encoder = brotli::CompressorWriter::new(&mut compressed, 4096, 11, 22);
        encoder.write_all(bytes)?;
    }
    Ok(compressed.len())
}

fn run_inspect(file: &str) -> Result<()> {
    let bytes = fs::read(file)?;
    let layout = ArtifactLayout::from_bytes(&bytes)?;
    let sections = layout.sections;

    title("REGION ARTIFACT");
    println!();

    section_top("HEADER");
    row(&format!("  version        {}", layout.header.version));
    row(&format!("  index offset   {}", layout.header.index_offset));
    row(&format!(
        "  file size      {}",
        format_size(layout.file_len)
    ));

    section_mid("SECTIONS");
    let section_rows = [
        ("HEADER", "BIN", sections.header.0, sections.header.1 - sections.header.0),
        ("RECORDS", "BITS", sections.records.0, sections.records_len()),
        ("INDEX", "IDX", sections.index.0, sections.index.1 - sections.index.0),
        ("CHAR TABLE", "UTF8", sections.char_table_start, layout.char_table_len()),
    ];
    for (name, tech, offset, size) in section_rows {
        row(&format!(
            "  {} {} {} {}",
            pad_right(name, 12),
            pad_right(&section_badge(tech), 7),
            pad_left(&format!("@{}", offset), 8),
            pad_left(&format_size(size), 10)
        ));
    }
    row(&format!(
        "  {} records │ {} characters",
        layout.record_count, layout.char_count
    ));

    section_mid("PROVINCES");
    for span in &layout.provinces {
        let label = span
            .label
            .clone()
            .unwrap_or_else(|| themed(GRAY, &[DIM], "(no province record)"));
        row(&format!(
            "  {:02}  {} {} {} {}",
            span.province,
            pad_right(&label, 24),
            pad_left(&format!("@{}", span.offset), 8),
            pad_left(&format!("{} rec", span.records), 9),
            pad_left(&format_size(span.len), 10)
        ));
    }

    section_mid("INTEGRITY");
    let crc = crc32fast::hash(&bytes);
    row(&format!("  crc32          {:#010x}", crc));
    let compressed = brotli_size(&bytes)?;
    row(&format!(
        "  brotli         {} {}",
        pad_left(&format_size(compressed), 10),
        savings_colored(bytes.len(), compressed)
    ));
    section_bot();

    eprintln!("{}", themed(GREEN, &[], "✅ Structure valid"));
    Ok(())
}

fn run_dump(file: &str, json: bool) -> Result<()> {
    let records = decode_records(&fs::read(file)?)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for record in &records {
        if json {
            writeln!(out, "{}", serde_json::to_string(record)?)?;
        } else {
            let year = record
                .discard_year
                .map(|y| format!(" {}", discarded_badge(y)))
                .unwrap_or_default();
            writeln!(
                out,
                "{}  {}  {}{}",
                record.code,
                pad_right(&record.region_type.to_string(), 12),
                record.full_name(),
                year
            )?;
        }
    }
    eprintln!("✅ {} records", records.len());
    Ok(())
}
