use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = medtrack_api::Args::parse();

	medtrack_api::run(args).await
}
