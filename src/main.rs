use anyhow::{Context, Result, anyhow};
use log::info;
use nowplaying::{Config, Database, QueueView, domain::TrackId};
use std::sync::{Arc, Mutex};

type SharedDb = Arc<Mutex<Database>>;

fn main() -> Result<()> {
    let config = Config::load()?;

    let mut clog = colog::default_builder();
    clog.filter(None, config.log_filter());
    clog.init();

    let db = Arc::new(Mutex::new(Database::open(&config)?));
    let args = std::env::args().skip(1).collect::<Vec<_>>();

    match args.first().map(String::as_str) {
        Some("add") => {
            let ids = parse_numbers::<TrackId>(&args[1..])?;
            lock(&db)?.enqueue(&ids)?;
            info!("Queued {} tracks", ids.len());
        }
        Some("clear") => lock(&db)?.clear_queue()?,
        _ => (),
    }

    let mut view = build_view(&config, &db)?;

    if let Some("remove") = args.first().map(String::as_str) {
        for position in parse_numbers::<usize>(&args[1..])? {
            match view.remove_at(position) {
                true => info!("Removed queue position {position}"),
                false => info!("Nothing to remove at position {position}"),
            }
        }
    }

    print_queue(&mut view);
    view.close();

    Ok(())
}

fn build_view(config: &Config, db: &SharedDb) -> Result<QueueView<SharedDb, SharedDb>> {
    match config.background_build {
        true => QueueView::spawn_build(Arc::clone(db), Arc::clone(db))?
            .recv()
            .context("Queue worker exited without a result"),
        false => Ok(QueueView::new(Arc::clone(db), Arc::clone(db))),
    }
}

fn print_queue(view: &mut QueueView<SharedDb, SharedDb>) {
    if view.is_empty() {
        println!("Queue is empty");
        return;
    }

    for position in 0..view.size() {
        if view.move_to(position) {
            println!(
                "{position:>4}  {} - {} [{}]",
                view.artist(),
                view.title(),
                view.album()
            );
        }
    }

    if view.refresh_if_stale() {
        info!("Library changed while listing; queue now holds {} tracks", view.size());
    }
}

fn parse_numbers<T: std::str::FromStr>(args: &[String]) -> Result<Vec<T>> {
    args.iter()
        .map(|a| a.parse().map_err(|_| anyhow!("Not a number: {a}")))
        .collect()
}

fn lock(db: &SharedDb) -> Result<std::sync::MutexGuard<'_, Database>> {
    db.lock().map_err(|_| anyhow!("Database lock poisoned"))
}
