//! Tabula CLI - check table manifests, render tables and export CSV.

mod infer;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tabula::widgets::NoResults;
use tabula::yaml::TableManifest;
use tabula::{
    rows_from_json, CommandExecutor, FsFileSaver, State, TableMessage, TableModel, TableRow,
    TableState, Widget, EXPORT_FILENAME,
};

#[derive(Parser)]
#[command(name = "tabula")]
#[command(about = "Data table manifests, rendering and CSV export")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Display settings shared by `render` and `export`.
#[derive(clap::Args)]
struct View {
    /// Table manifest (default: inferred from the first row)
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Column to sort by
    #[arg(short, long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Filter text
    #[arg(short, long)]
    filter: Option<String>,

    /// Show every declared column
    #[arg(long)]
    all_columns: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check table manifest validity
    Check {
        /// Path to manifest file
        #[arg(default_value = "table.yaml")]
        manifest: PathBuf,
    },

    /// Render rows as an HTML table
    Render {
        /// JSON array of row objects
        rows: PathBuf,

        #[command(flatten)]
        view: View,

        /// Write HTML here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export displayed rows to data.csv
    Export {
        /// JSON array of row objects
        rows: PathBuf,

        #[command(flatten)]
        view: View,

        /// Directory to write data.csv into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { manifest } => check_manifest(&manifest),
        Commands::Render { rows, view, output } => render(&rows, &view, output.as_deref()),
        Commands::Export {
            rows,
            view,
            out_dir,
        } => export(&rows, &view, out_dir),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn check_manifest(path: &Path) -> Result<()> {
    println!("Checking manifest: {}", path.display());
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    let manifest = TableManifest::load(&content).context("manifest invalid")?;
    let model = manifest.build_model().context("manifest invalid")?;

    println!("Manifest valid!");
    println!("  Name: {}", manifest.name);
    println!("  Columns: {}", model.len());
    println!(
        "  Sortable: {}",
        model.columns().iter().filter(|c| c.sortable).count()
    );
    println!("  Hidden by default: {}", model.hidden_keys().join(", "));
    println!("  Filter debounce: {}ms", manifest.filter_debounce_ms);
    Ok(())
}

fn render(rows: &Path, view: &View, output: Option<&Path>) -> Result<()> {
    let state = load_state(rows, view)?;
    let html = table_html(&state);
    match output {
        Some(path) => {
            fs::write(path, html).with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote table");
        }
        None => println!("{html}"),
    }
    Ok(())
}

fn export(rows: &Path, view: &View, out_dir: PathBuf) -> Result<()> {
    let mut state = load_state(rows, view)?;
    let executor = CommandExecutor::new(FsFileSaver::new(out_dir));

    let command = state.update(TableMessage::ExportCsv);
    for msg in executor.execute(command).into_messages() {
        state.update(msg);
    }
    if let Some(err) = state.last_export_error() {
        bail!("export failed: {err}");
    }
    println!(
        "Exported {} rows to {}",
        state.export_rows().len(),
        executor.saver().path_for(EXPORT_FILENAME).display()
    );
    Ok(())
}

fn load_state(rows_path: &Path, view: &View) -> Result<TableState> {
    let json = fs::read_to_string(rows_path)
        .with_context(|| format!("failed to read rows {}", rows_path.display()))?;
    let rows = rows_from_json(&json).context("rows must be a JSON array of objects with an id")?;
    let model = load_model(view.manifest.as_deref(), &rows)?;
    tracing::debug!(rows = rows.len(), columns = model.len(), "loaded table");

    let mut state = TableState::new(Arc::new(model), rows);
    if view.all_columns {
        let hidden: Vec<String> = state.model().hidden_keys().to_vec();
        for key in hidden {
            state.update(TableMessage::ColumnToggled(key));
        }
    }
    if let Some(text) = &view.filter {
        state.update(TableMessage::FilterChanged(text.clone()));
    }
    if let Some(key) = &view.sort {
        let sortable = state.model().column(key).is_some_and(|c| c.sortable);
        if !sortable {
            bail!("column '{key}' is not sortable");
        }
        let clicks = if view.desc { 2 } else { 1 };
        for _ in 0..clicks {
            state.update(TableMessage::HeaderClicked(key.clone()));
        }
    }
    Ok(state)
}

fn load_model(manifest: Option<&Path>, rows: &[TableRow]) -> Result<TableModel> {
    match manifest {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read manifest {}", path.display()))?;
            Ok(TableManifest::load(&content)?.build_model()?)
        }
        None => infer::infer_model(rows).context("cannot infer columns without rows"),
    }
}

/// The table alone, or the "no results" notice when nothing matches.
fn table_html(state: &TableState) -> String {
    let table = state.data_table();
    if table.is_empty() {
        NoResults::new().to_html()
    } else {
        table.to_html()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROWS: &str = r#"[
        {"id": 2, "name": "bob", "age": 25},
        {"id": 1, "name": "Ann", "age": 30}
    ]"#;

    fn view() -> View {
        View {
            manifest: None,
            sort: None,
            desc: false,
            filter: None,
            all_columns: false,
        }
    }

    fn write_rows(dir: &Path) -> PathBuf {
        let path = dir.join("rows.json");
        fs::write(&path, ROWS).unwrap();
        path
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["tabula", "render", "rows.json", "--sort", "age", "--desc"])
            .unwrap();
        match cli.command {
            Commands::Render { view, .. } => {
                assert_eq!(view.sort.as_deref(), Some("age"));
                assert!(view.desc);
            }
            _ => panic!("expected render"),
        }
        assert!(Cli::try_parse_from(["tabula", "render", "rows.json", "--desc"]).is_err());
    }

    #[test]
    fn test_load_state_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let rows = write_rows(dir.path());

        let state = load_state(&rows, &view()).unwrap();
        let ids: Vec<i64> = state.displayed_rows().iter().map(TableRow::id).collect();
        assert_eq!(ids, [1, 2]);

        let mut v = view();
        v.sort = Some("age".into());
        v.desc = true;
        let state = load_state(&rows, &v).unwrap();
        let ids: Vec<i64> = state.displayed_rows().iter().map(TableRow::id).collect();
        assert_eq!(ids, [1, 2]);

        let mut v = view();
        v.filter = Some("BO".into());
        let state = load_state(&rows, &v).unwrap();
        assert_eq!(state.displayed_rows().len(), 1);
    }

    #[test]
    fn test_load_state_rejects_unknown_sort() {
        let dir = tempfile::tempdir().unwrap();
        let rows = write_rows(dir.path());
        let mut v = view();
        v.sort = Some("nope".into());
        assert!(load_state(&rows, &v).is_err());
    }

    #[test]
    fn test_export_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let rows = write_rows(dir.path());
        export(&rows, &view(), dir.path().join("out")).unwrap();
        let csv = fs::read_to_string(dir.path().join("out").join(EXPORT_FILENAME)).unwrap();
        assert_eq!(csv, "id,name,age\n1,\"Ann\",30\n2,\"bob\",25");
    }

    #[test]
    fn test_render_html() {
        let dir = tempfile::tempdir().unwrap();
        let rows = write_rows(dir.path());
        let out = dir.path().join("table.html");
        render(&rows, &view(), Some(&out)).unwrap();
        let html = fs::read_to_string(out).unwrap();
        assert!(html.starts_with("<table"));
        assert!(html.contains("Ann"));
    }

    #[test]
    fn test_check_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deals.yaml");
        fs::write(&path, tabula::yaml::DEALS_MANIFEST).unwrap();
        check_manifest(&path).unwrap();

        fs::write(&path, "name: broken\ncolumns: []\n").unwrap();
        assert!(check_manifest(&path).is_err());
    }
}
