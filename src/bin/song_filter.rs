// src/bin/song_filter.rs
use lyric_scrape::cli;

// An Err return prints "Error: ..." and exits with status 1.
fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::filter_main()
}
