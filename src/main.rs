use anyhow::{Context, Result};
use clap::Parser;
use itunes_reader::{format, Library, MediaKind};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "itunes-reader")]
#[command(about = "Inspect an iTunes/Music library XML export", long_about = None)]
struct Args {
    /// Path to the library export (iTunes Music Library.xml)
    #[arg(
        short = 'l',
        long,
        default_value = "~/Music/iTunes/iTunes Music Library.xml"
    )]
    library: String,

    /// Print the contents of one playlist (by name or persistent ID)
    #[arg(short = 'p', long)]
    playlist: Option<String>,

    /// Dump all playlists (with their tracks) as JSON
    #[arg(long)]
    json: bool,

    /// Translate Distinguished Kind codes into labels in JSON output
    #[arg(long)]
    translate_kinds: bool,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Expand ~ in the library path
    let library_path = shellexpand::tilde(&args.library);
    let library_path = PathBuf::from(library_path.as_ref());

    let library = Library::from_file(&library_path)
        .with_context(|| format!("Failed to parse library export: {:?}", library_path))?;

    log::info!(
        "Library loaded: {} tracks, {} playlists",
        library.track_count(),
        library.playlist_count()
    );
    for kind in MediaKind::ALL {
        log::info!("  {:?}: {} tracks", kind, library.tracks_in(kind).len());
    }

    if args.json {
        let mappings: Vec<serde_json::Value> = library
            .playlists()
            .iter()
            .map(|p| serde_json::Value::Object(p.as_mapping(&library, args.translate_kinds)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&mappings)?);
        return Ok(());
    }

    if let Some(wanted) = args.playlist {
        let tracks = library
            .get_playlist_contents(&wanted)
            .with_context(|| format!("Failed to read playlist {:?}", wanted))?;

        println!("{} ({} tracks)", wanted, tracks.len());
        for track in tracks {
            println!(
                "  {} - {} [{} s, {}]",
                track.artist.as_deref().unwrap_or("Unknown Artist"),
                track.name.as_deref().unwrap_or("Untitled"),
                format::total_seconds(track.total_time),
                format::size_label(track.size),
            );
        }
        return Ok(());
    }

    // Default: show the playlist tree
    for playlist in library.playlists() {
        println!("{} ({} tracks)", playlist.display_path, playlist.len());
    }

    Ok(())
}
