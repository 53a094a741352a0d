use std::io::{self, Write};

fn main() -> anyhow::Result<()> {
    bankline_observability::init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = bankline_demo::run(&mut out)?;
    out.flush()?;

    tracing::info!(
        accounts = outcome.book.len(),
        published_events = outcome.published_events,
        "demo finished"
    );
    Ok(())
}
