//! `forage` — record plants, spots, and notes from the command line.
//!
//! Presence of `--latin` or `--spot` creates or edits that entity; both
//! together also link them. Dependent flags require their parent key and
//! are rejected by the parser before any storage access.
//!
//! # Usage
//!
//! ```text
//! forage --latin "quercus robur" --common "English oak"
//! forage --latin "Quercus robur" --id-note "acorns present"
//! forage --latin "Quercus robur" --spot filled.count.soap
//! forage --spot filled.count.soap --spot-note "shady bank, north side"
//! forage --note "first frost of the season"
//! forage --show --latin "Quercus robur"
//! ```

use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use clap::Parser;
use forage_core::{
  list::AccumList,
  note::{Note, NoteKind},
  plant::{LatinName, Plant, PlantPatch},
  repo,
  spot::{GeoAddress, Spot, SpotPatch},
  store::ForageStore,
};
use forage_geocode::W3wClient;
use forage_store_sqlite::SqliteStore;
use serde::Deserialize;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "forage", about = "Personal foraging knowledge base")]
struct Args {
  /// Latin binomial name of a plant; normalized before use.
  #[arg(short, long, value_name = "NAME")]
  latin: Option<String>,

  /// Common name to record for the plant.
  #[arg(short, long, value_name = "NAME", requires = "latin")]
  common: Option<String>,

  /// Identification note to attach to the plant.
  #[arg(long, value_name = "TEXT", requires = "latin")]
  id_note: Option<String>,

  /// Usage note to attach to the plant.
  #[arg(long, value_name = "TEXT", requires = "latin")]
  use_note: Option<String>,

  /// Three-word address of a spot.
  #[arg(short, long, value_name = "ADDR")]
  spot: Option<String>,

  /// Note to attach to the spot.
  #[arg(long, value_name = "TEXT", requires = "spot")]
  spot_note: Option<String>,

  /// Free-standing note attached to nothing.
  #[arg(short, long, value_name = "TEXT")]
  note: Option<String>,

  /// Look the named records up without writing anything.
  #[arg(
    long,
    conflicts_with_all = ["common", "id_note", "use_note", "spot_note", "note"]
  )]
  show: bool,

  /// Emit the affected records as JSON instead of text.
  #[arg(long)]
  json: bool,

  /// Path to the SQLite database file.
  #[arg(long, env = "FORAGE_DB", value_name = "FILE")]
  db: Option<PathBuf>,

  /// what3words API key; only needed when a new spot is recorded.
  #[arg(long, env = "W3W_API_KEY", value_name = "KEY")]
  w3w_key: Option<String>,

  /// Path to a TOML config file (db path, API key).
  #[arg(long, value_name = "FILE")]
  config: Option<PathBuf>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  db:           String,
  #[serde(default)]
  w3w_key:      String,
  #[serde(default)]
  w3w_base_url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // Usage errors not expressible through clap `requires`.
  if args.latin.is_none() && args.spot.is_none() && args.note.is_none() {
    bail!("nothing to do: pass --latin, --spot, or --note (see --help)");
  }
  if args.show && args.latin.is_none() && args.spot.is_none() {
    bail!("--show needs --latin or --spot");
  }

  // Parse natural keys up front: a malformed name or address aborts before
  // anything touches storage.
  let latin = args.latin.as_deref().map(LatinName::parse).transpose()?;
  let address = args.spot.as_deref().map(GeoAddress::parse).transpose()?;

  // CLI flags override config file, which overrides defaults.
  let db_path = args
    .db
    .clone()
    .or_else(|| (!file_cfg.db.is_empty()).then(|| PathBuf::from(&file_cfg.db)))
    .unwrap_or_else(|| PathBuf::from("forage.db"));

  let store = SqliteStore::open(&db_path)
    .await
    .with_context(|| format!("opening database {}", db_path.display()))?;

  if args.show {
    return show(&store, latin.as_ref(), address.as_ref(), args.json).await;
  }

  let mut plant: Option<Plant> = None;
  let mut spot: Option<Spot> = None;
  let mut notes: Vec<Note> = Vec::new();

  // Plant side: upsert with the common name, then attach notes.
  if let Some(latin) = &latin {
    let mut patch = PlantPatch::default();
    if let Some(common) = &args.common {
      patch.common.push(common.clone());
    }
    let mut p = repo::upsert_plant(&store, latin, patch).await?;

    if let Some(text) = &args.id_note {
      let (updated, note) =
        repo::add_note_to_plant(&store, latin, NoteKind::Identification, text)
          .await?;
      p = updated;
      notes.push(note);
    }
    if let Some(text) = &args.use_note {
      let (updated, note) =
        repo::add_note_to_plant(&store, latin, NoteKind::Use, text).await?;
      p = updated;
      notes.push(note);
    }

    info!(latin = %latin, id = p.plant_id, "plant upserted");
    plant = Some(p);
  }

  // Spot side: creation may consult the geocoder; notes and linking follow.
  if let Some(address) = &address {
    let geocoder = build_geocoder(&args, &file_cfg)?;
    let mut s =
      repo::upsert_spot(&store, &geocoder, address, SpotPatch::default())
        .await?;

    if let Some(text) = &args.spot_note {
      let (updated, note) =
        repo::add_note_to_spot(&store, &geocoder, address, text).await?;
      s = updated;
      notes.push(note);
    }
    if let Some(latin) = &latin {
      let (p, updated) =
        repo::link_plant_spot(&store, &geocoder, latin, address).await?;
      plant = Some(p);
      s = updated;
      info!(latin = %latin, address = %address, "linked plant and spot");
    }

    info!(address = %address, id = s.spot_id, "spot upserted");
    spot = Some(s);
  }

  // Bare note.
  if let Some(text) = &args.note {
    notes.push(repo::add_note(&store, text).await?);
  }

  report(plant.as_ref(), spot.as_ref(), &notes, args.json)
}

// ─── Geocoder setup ───────────────────────────────────────────────────────────

fn build_geocoder(args: &Args, file_cfg: &ConfigFile) -> Result<W3wClient> {
  let key = args
    .w3w_key
    .clone()
    .or_else(|| (!file_cfg.w3w_key.is_empty()).then(|| file_cfg.w3w_key.clone()))
    .context("a what3words API key is required for spot operations")?;

  let client = W3wClient::new(key)?;
  Ok(if file_cfg.w3w_base_url.is_empty() {
    client
  } else {
    client.with_base_url(&file_cfg.w3w_base_url)
  })
}

// ─── Output ───────────────────────────────────────────────────────────────────

fn report(
  plant: Option<&Plant>,
  spot: Option<&Spot>,
  notes: &[Note],
  json: bool,
) -> Result<()> {
  if json {
    let doc = serde_json::json!({
      "plant": plant,
      "spot": spot,
      "notes": notes,
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    return Ok(());
  }

  if let Some(p) = plant {
    println!("plant {} (id {})", p.latin, p.plant_id);
  }
  if let Some(s) = spot {
    println!(
      "spot {} (id {}, {:.6}, {:.6})",
      s.w3w_name, s.spot_id, s.coords.lat, s.coords.lng
    );
  }
  for note in notes {
    println!("note {} recorded", note.note_id);
  }
  Ok(())
}

async fn show(
  store: &SqliteStore,
  latin: Option<&LatinName>,
  address: Option<&GeoAddress>,
  json: bool,
) -> Result<()> {
  if let Some(latin) = latin {
    let plant = repo::get_plant(store, latin).await?;
    if json {
      println!("{}", serde_json::to_string_pretty(&plant)?);
    } else {
      println!("plant {} (id {})", plant.latin, plant.plant_id);
      if !plant.common.is_empty() {
        println!("  common: {}", plant.common.to_column());
      }
      if !plant.spots.is_empty() {
        println!("  spots: {}", plant.spots.to_column());
      }
      print_notes(store, "identification", &plant.id_notes).await?;
      print_notes(store, "use", &plant.use_notes).await?;
    }
  }

  if let Some(address) = address {
    let spot = repo::get_spot(store, address).await?;
    if json {
      println!("{}", serde_json::to_string_pretty(&spot)?);
    } else {
      println!(
        "spot {} (id {}, {:.6}, {:.6})",
        spot.w3w_name, spot.spot_id, spot.coords.lat, spot.coords.lng
      );
      if !spot.plants.is_empty() {
        println!("  plants: {}", spot.plants.to_column());
      }
      print_notes(store, "spot", &spot.notes).await?;
    }
  }

  Ok(())
}

/// Resolve each referenced note id and print its text. Elements that are
/// not parseable ids (or dangle) are skipped rather than fatal.
async fn print_notes(
  store: &SqliteStore,
  label: &str,
  ids: &AccumList,
) -> Result<()> {
  for element in ids.iter() {
    let Ok(id) = element.parse::<i64>() else {
      continue;
    };
    if let Some(note) = store.get_note(id).await? {
      println!(
        "  {label} note {} ({}): {}",
        note.note_id,
        note.time.format("%Y-%m-%d"),
        note.text
      );
    }
  }
  Ok(())
}
