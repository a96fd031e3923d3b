use {
  crate::{cli::CliOptions, report::Scanner},
  clap::Parser,
  impact_indexer::{HttpIndexer, Indexer},
  impact_sdk::ImpactCalculator,
  tracing::info,
  tracing_subscriber::EnvFilter,
};

mod cli;
mod report;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // stdout is reserved for the JSON lines
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info")),
    )
    .with_writer(std::io::stderr)
    .init();

  let opts = CliOptions::parse();
  info!("Scanner options: {opts:?}");

  let calculator = ImpactCalculator::new(HttpIndexer::new(opts.indexer_config())?);
  let mut scanner = Scanner::new(opts.address.clone());

  let query = opts.query();
  let mut page = calculator.indexer().search_transactions(&query).await?;
  let mut pages = 1;

  loop {
    info!("processing page {pages} with {} transactions", page.transactions.len());
    for line in scanner.process(&calculator, &page.transactions).await? {
      println!("{}", serde_json::to_string(&line)?);
    }

    // the indexer keeps handing out tokens until a page comes back empty
    let token = match page.next_token.take() {
      Some(token) if !page.transactions.is_empty() => token,
      _ => break,
    };

    // public indexers rate limit aggressive clients
    tokio::time::sleep(opts.page_delay()).await;
    page = calculator
      .indexer()
      .search_transactions(&query.after(token))
      .await?;
    pages += 1;
  }

  info!("scanned {pages} pages");
  Ok(())
}
