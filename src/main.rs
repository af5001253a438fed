use anyhow::bail;
use blockpage::{Result, block::validate, blocks, diagnostics, page, render};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "blockpage")]
#[command(about = "Block-based page renderer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a page definition to a self-contained HTML file.
    Render {
        #[arg(long)]
        page: String,

        #[arg(short = 'o', long)]
        out: String,
    },

    /// Audit a page definition without rendering it.
    Check {
        #[arg(long)]
        page: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Render { page, out } => {
            // 1) Parse the page definition (block descriptors + optional meta).
            let spec = page::load_page_file(&page)?;

            // 2) Set up the registry. Every renderer is registered before the
            //    first render call; the registry is read-only from here on.
            let registry = blocks::builtin_registry();

            // 3) One render pass over the top-level blocks. Broken blocks
            //    surface as placeholders or warnings, never as an Err here.
            let loader = render::BlockLoader::new(&registry);
            let results = loader.render(&spec.blocks);

            // 4) Assemble and write the document.
            let html = render::html::render_document(spec.title(), &results);
            std::fs::write(&out, html)?;
            println!("Wrote {}", out);
        }
        Commands::Check { page } => {
            // 1) Parse the page definition.
            let spec = page::load_page_file(&page)?;

            // 2) Audit it against the structural rules and the builtin registry.
            let registry = blocks::builtin_registry();
            let findings = validate::check_blocks(&spec.blocks, &registry);

            let kinds: Vec<&str> = registry.kinds().collect();
            println!("registered types: {}", kinds.join(", "));

            if findings.is_empty() {
                println!("{}: {} top-level blocks, no problems", page, spec.blocks.len());
            } else {
                for finding in &findings {
                    println!("{}", finding);
                }
                bail!(
                    "{}",
                    diagnostics::error_message(format!(
                        "{} problem(s) in {}",
                        findings.len(),
                        page
                    ))
                );
            }
        }
    }

    Ok(())
}
