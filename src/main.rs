use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = safe_path_ops::cli::parse();
    app::run(args)
}
