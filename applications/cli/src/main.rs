/// Mixtape - build playlists from local audio files
use anyhow::Context;
use clap::{Parser, Subcommand};
use mixtape_builder::{
    format_time, BuilderEvent, ConflictResolution, DragGrab, DropOutcome, DropTarget,
    PlaylistBuilder, SaveOutcome,
};
use mixtape_cli::{
    copy_audio_files,
    lookup::{entry_at, find_saved_playlist, find_track},
    queue_tracks, DirectoryExport, M3uCodec, MixtapeConfig,
};
use mixtape_core::{SavedPlaylistId, TrackId};
use mixtape_metadata::LoftyDurationProbe;
use mixtape_storage::SqliteStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mixtape")]
#[command(about = "Build playlists from local audio files", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./mixtape.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload audio files
    Add {
        /// Audio files to add
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// List tracks
    Tracks {
        /// Show the recycle bin instead
        #[arg(long)]
        deleted: bool,
        /// Only tracks whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Move tracks (or saved playlists) to the recycle bin
    Delete {
        /// Track ids, id prefixes or names
        #[arg(required = true)]
        keys: Vec<String>,
        /// Keys refer to saved playlists
        #[arg(long)]
        saved: bool,
    },
    /// Restore tracks (or saved playlists) from the recycle bin
    Restore {
        #[arg(required = true)]
        keys: Vec<String>,
        #[arg(long)]
        saved: bool,
    },
    /// Permanently delete tracks (or saved playlists) from the recycle bin
    Purge {
        #[arg(required = true)]
        keys: Vec<String>,
        #[arg(long)]
        saved: bool,
    },
    /// Add tracks to the working playlist
    Queue {
        /// Track ids, id prefixes or names
        #[arg(required = true)]
        keys: Vec<String>,
        /// Insert before this 1-based position instead of appending
        #[arg(long)]
        at: Option<usize>,
    },
    /// Move a playlist entry onto another position (1-based)
    Move { from: usize, to: usize },
    /// Remove the entry at a 1-based position
    Remove { position: usize },
    /// Show the working playlist
    Playlist,
    /// Remove every entry from the working playlist
    Clear,
    /// Save the working playlist to the library
    Save {
        /// Name to save under (default: the working playlist's name)
        name: Option<String>,
        /// Replace an existing playlist with the same name
        #[arg(long, conflicts_with = "save_as_new")]
        overwrite: bool,
        /// Save under a numbered name if the name is taken
        #[arg(long)]
        save_as_new: bool,
    },
    /// List saved playlists
    Library {
        /// Show the recycle bin instead
        #[arg(long)]
        deleted: bool,
    },
    /// Replace the working playlist with a saved one
    Load { key: String },
    /// Rename a saved playlist
    Rename { key: String, name: String },
    /// Write the working playlist as an M3U file
    Export {
        /// Output directory (default from config)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Prefix for file paths inside the playlist
        #[arg(short, long)]
        base_path: Option<String>,
        /// Playlist name used for the file name
        #[arg(short, long)]
        name: Option<String>,
        /// Copy the audio files next to the playlist
        #[arg(long)]
        copy_audio: bool,
    },
    /// Append tracks listed in an M3U file to the working playlist
    Import { file: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mixtape=info,mixtape_cli=info,mixtape_builder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = MixtapeConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let store = SqliteStore::connect(&config.storage.database_url)
        .await
        .with_context(|| format!("Failed to open {}", config.storage.database_url))?;
    let probe = LoftyDurationProbe::new();
    let mut builder = PlaylistBuilder::load(config.builder.clone(), Arc::new(store), &probe).await?;

    let result = run(cli.command, &mut builder, &config, &probe).await;

    builder.flush().await;
    report_events(&mut builder);
    result
}

async fn run(
    command: Commands,
    builder: &mut PlaylistBuilder,
    config: &MixtapeConfig,
    probe: &LoftyDurationProbe,
) -> anyhow::Result<()> {
    match command {
        Commands::Add { paths } => {
            let ids = builder.add_files(&paths, probe);
            println!("Added {} track(s)", ids.len());
        }
        Commands::Tracks { deleted, search } => list_tracks(builder, deleted, search.as_deref()),
        Commands::Delete { keys, saved } => {
            if saved {
                let ids = saved_ids(builder, &keys, false)?;
                println!("Moved {} playlist(s) to the recycle bin", builder.delete_playlists(&ids));
            } else {
                let ids = track_ids(builder, &keys, false)?;
                println!("Moved {} track(s) to the recycle bin", builder.delete_tracks(&ids));
            }
        }
        Commands::Restore { keys, saved } => {
            if saved {
                let ids = saved_ids(builder, &keys, true)?;
                println!("Restored {} playlist(s)", builder.restore_playlists(&ids));
            } else {
                let ids = track_ids(builder, &keys, true)?;
                println!("Restored {} track(s)", builder.restore_tracks(&ids));
            }
        }
        Commands::Purge { keys, saved } => {
            if saved {
                let ids = saved_ids(builder, &keys, true)?;
                println!("Permanently deleted {} playlist(s)", builder.purge_playlists(&ids));
            } else {
                let ids = track_ids(builder, &keys, true)?;
                println!("Permanently deleted {} track(s)", builder.purge_tracks(&ids));
            }
        }
        Commands::Queue { keys, at } => queue(builder, &keys, at).await?,
        Commands::Move { from, to } => {
            let entries = builder.playlist().entries();
            let active = entry_at(entries, from)?;
            let over = entry_at(entries, to)?;

            builder.drag_start(DragGrab::PlaylistEntry(active))?;
            match builder.drag_end(DropTarget::PlaylistEntry(over)) {
                DropOutcome::Reordered { from, to } => {
                    println!("Moved entry {} to position {}", from + 1, to + 1);
                }
                _ => println!("Nothing to move"),
            }
        }
        Commands::Remove { position } => {
            let entry = entry_at(builder.playlist().entries(), position)?;
            builder.remove_entry(&entry)?;
            println!("Removed entry {}", position);
        }
        Commands::Playlist => show_playlist(builder),
        Commands::Clear => {
            builder.clear_playlist();
            println!("Playlist cleared");
        }
        Commands::Save {
            name,
            overwrite,
            save_as_new,
        } => {
            if let Some(name) = name {
                builder.rename_playlist(&name)?;
            }
            save(builder, overwrite, save_as_new);
        }
        Commands::Library { deleted } => list_library(builder, deleted),
        Commands::Load { key } => {
            let id = find_saved_playlist(&builder.active_playlists(), &key)?;
            builder.load_saved(&id)?;
            println!(
                "Loaded \"{}\" ({} entries)",
                builder.playlist().name(),
                builder.playlist().len()
            );
        }
        Commands::Rename { key, name } => {
            let id = find_saved_playlist(&builder.active_playlists(), &key)?;
            builder.rename_saved(&id, &name)?;
            println!("Renamed to \"{}\"", name.trim());
        }
        Commands::Export {
            out,
            base_path,
            name,
            copy_audio,
        } => {
            if let Some(name) = name {
                builder.rename_playlist(&name)?;
            }
            let output_dir = out.unwrap_or_else(|| config.export.output_dir.clone());
            let base_path = base_path.or_else(|| config.export.base_path.clone());

            let target = DirectoryExport::new(&output_dir);
            let file_name = builder.export_to(&target, base_path.as_deref())?;
            println!("Wrote {}", target.playlist_path(&file_name).display());

            if copy_audio {
                let copied = copy_audio_files(builder.playlist().entries(), &output_dir).await?;
                println!("Copied {} audio file(s)", copied);
            }
        }
        Commands::Import { file } => {
            let content = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let report = builder.import_playlist(&content, &M3uCodec::new());
            println!("Imported {} track(s)", report.matched);
            if report.unmatched > 0 {
                println!("{} file(s) had no matching track", report.unmatched);
            }
        }
    }

    Ok(())
}

async fn queue(builder: &mut PlaylistBuilder, keys: &[String], at: Option<usize>) -> anyhow::Result<()> {
    let ids = track_ids(builder, keys, false)?;

    match queue_tracks(builder, &ids, at).await? {
        DropOutcome::Inserted { index, count } => {
            println!("Added {} track(s) at position {}", count, index + 1);
        }
        _ => println!("Nothing added"),
    }
    Ok(())
}

fn save(builder: &mut PlaylistBuilder, overwrite: bool, save_as_new: bool) {
    match builder.save_to_library() {
        SaveOutcome::Saved(id) => println!("Saved \"{}\" ({})", builder.playlist().name(), id),
        SaveOutcome::NameCollision(pending) => {
            let resolution = if overwrite {
                ConflictResolution::Overwrite
            } else if save_as_new {
                ConflictResolution::SaveAsNew
            } else {
                println!(
                    "A playlist named \"{}\" already exists. Use --overwrite or --save-as-new.",
                    pending.name
                );
                return;
            };

            let id = builder.resolve_save(pending, resolution);
            if let Some(saved) = builder.library().store().get(&id) {
                println!("Saved \"{}\" ({})", saved.name, id);
            }
        }
    }
}

fn track_ids(builder: &PlaylistBuilder, keys: &[String], deleted: bool) -> anyhow::Result<Vec<TrackId>> {
    let tracks = if deleted {
        builder.deleted_tracks()
    } else {
        builder.active_tracks()
    };
    keys.iter()
        .map(|key| find_track(&tracks, key).map_err(Into::into))
        .collect()
}

fn saved_ids(
    builder: &PlaylistBuilder,
    keys: &[String],
    deleted: bool,
) -> anyhow::Result<Vec<SavedPlaylistId>> {
    let playlists = if deleted {
        builder.deleted_playlists()
    } else {
        builder.active_playlists()
    };
    keys.iter()
        .map(|key| find_saved_playlist(&playlists, key).map_err(Into::into))
        .collect()
}

fn list_tracks(builder: &PlaylistBuilder, deleted: bool, search: Option<&str>) {
    if deleted {
        let tracks = builder.deleted_tracks();
        if tracks.is_empty() {
            println!("Recycle bin is empty");
        }
        for track in tracks {
            let deleted_at = track
                .deleted_at
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default();
            println!("{}  {}  (deleted {})", short_id(track.id.as_str()), track.name, deleted_at);
        }
        return;
    }

    let tracks = match search {
        Some(query) => builder.search_tracks(query),
        None => builder.active_tracks(),
    };
    if tracks.is_empty() {
        println!("No tracks");
    }
    for track in tracks {
        println!(
            "{}  {}  {}",
            short_id(track.id.as_str()),
            format_time(track.duration_seconds),
            track.name
        );
    }
}

fn show_playlist(builder: &PlaylistBuilder) {
    let playlist = builder.playlist();
    println!("{} ({} entries, {})", playlist.name(), playlist.len(), builder.formatted_duration());
    for (index, entry) in playlist.entries().iter().enumerate() {
        println!(
            "{:>3}. {}  {}",
            index + 1,
            format_time(entry.duration_seconds),
            entry.name
        );
    }
}

fn list_library(builder: &PlaylistBuilder, deleted: bool) {
    let playlists = if deleted {
        builder.deleted_playlists()
    } else {
        builder.active_playlists()
    };
    if playlists.is_empty() {
        println!("{}", if deleted { "Recycle bin is empty" } else { "Library is empty" });
    }
    for playlist in playlists {
        println!(
            "{}  {}  ({} entries, {})",
            short_id(playlist.id.as_str()),
            playlist.name,
            playlist.items.len(),
            format_time(playlist.total_duration())
        );
    }
}

fn report_events(builder: &mut PlaylistBuilder) {
    for event in builder.drain_events() {
        match event {
            BuilderEvent::PersistenceWriteFailed { message, .. } => {
                eprintln!("warning: {}", message);
            }
            BuilderEvent::DurationUnavailable { file_name } => {
                eprintln!("warning: could not read the duration of {}", file_name);
            }
            _ => {}
        }
    }
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
