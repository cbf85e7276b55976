use clap::{Parser, Subcommand};
use std::path::PathBuf;
use zen_press::build::BuildPaths;
use zen_press::{build, config, load, output};

#[derive(Parser)]
#[command(name = "zen-press")]
#[command(version)]
#[command(about = "Static site generator for a JSON-driven blog")]
#[command(long_about = "\
Static site generator for a JSON-driven blog

Articles are plain JSON files; pages are HTML templates with {{PLACEHOLDER}}
tokens. The build writes the home page, the archive, one directory per
article, and a sitemap.

Data structure:

  data/
  ├── site.toml                # Site config (optional; SITE_URL overrides)
  ├── archive.json             # Archive manifest (ids or {id, title, created_at})
  └── articles/
      ├── index.json           # Home manifest (ordered article ids)
      └── 2025-11-01-1.json    # One article per file; id is the URL slug

Templates (home.html, archive.html, article-page.html) live in the templates
directory. Run 'zen-press gen-config' for a documented site.toml.")]
struct Cli {
    /// Data directory (articles and manifests)
    #[arg(long, default_value = "data", global = true)]
    data: PathBuf,

    /// Template directory
    #[arg(long, default_value = "templates", global = true)]
    templates: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the full site: home, archive, article pages, sitemap
    Build,
    /// Validate data and manifests without writing anything
    Check,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let config = config::load_config(&cli.data)?;
            let paths = BuildPaths {
                data_dir: cli.data,
                templates_dir: cli.templates,
                output_dir: cli.output,
            };
            println!("==> Building {}", paths.data_dir.display());
            let summary = build::build_site(&config, &paths)?;
            output::print_warnings(&summary.warnings);
            output::print_build_summary(&summary);
            println!("==> Build complete: {}", paths.output_dir.display());
        }
        Command::Check => {
            let config = config::load_config(&cli.data)?;
            let paths = BuildPaths {
                data_dir: cli.data,
                templates_dir: cli.templates,
                output_dir: cli.output,
            };
            println!("==> Checking {}", paths.data_dir.display());
            let set = load::load_articles(&paths.articles_data_dir())?;
            let index = load::load_index(&paths.index_manifest())?;
            let (home, home_warnings) = load::select_for_home(&index, &set.by_id);
            let (archive, archive_warnings) =
                load::load_archive_entries(&paths.archive_manifest(), &set.by_id);

            let mut warnings = set.warnings;
            warnings.extend(home_warnings);
            warnings.extend(archive_warnings);
            output::print_warnings(&warnings);
            for line in output::format_check_output(set.by_id.len(), home.len(), archive.len()) {
                println!("{line}");
            }
            println!("==> Content is valid (base URL: {})", config.base_url);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
