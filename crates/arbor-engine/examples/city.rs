//! Builds a small street scene, mutates it over a few transactions, and
//! prints the event stream a renderer would consume.
//!
//! Run with `RUST_LOG=debug cargo run --example city` for engine logs.

use std::thread;
use std::time::Duration;

use anyhow::Result;

use arbor_engine::attr::AttributeMap;
use arbor_engine::logging::{init_logging, LoggingConfig};
use arbor_engine::prelude::*;

fn attrs(pairs: &[(&str, &str)]) -> AttributeMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let engine = LayoutEngine::new();
    let listener = engine.subscribe(EventFilter::SkipNonDrawable);

    // A consumer thread, as a thin 3D client would run one.
    let consumer = thread::spawn(move || loop {
        match listener.listen_for(Duration::from_millis(500)) {
            Ok(Some(event)) => {
                println!(
                    "{:>8?} {:<24} pos {} bounds {}",
                    event.kind,
                    event.path.to_string(),
                    event.geometry.pos(),
                    event.geometry.bounds()
                );
            }
            Ok(None) | Err(_) => break,
        }
    });

    // Transaction 1: a street of houses, with a template for later growth.
    {
        let mut tx = engine.transaction();
        let root = tx.root();
        let street = tx.construct_child(root, "street", StreetElement::new())?;
        tx.update_attributes(street, &attrs(&[("spacing", "1")]))?;

        let house = tx.construct_template(street, "house", BoxElement::new())?;
        tx.update_attributes(house, &attrs(&[("width", "2"), ("height", "3"), ("color", "orange3")]))?;

        for i in 0..4 {
            tx.try_make_template(street, "house", &format!("house{i}"))?;
        }

        let road = tx.construct_child(street, "road", BoxElement::new())?;
        tx.update_attributes(road, &attrs(&[("height", "0.1"), ("depth", "2"), ("color", "gray7")]))?;

        tx.render()?;
    }

    // Transaction 2: one house grows taller and turns red.
    {
        let mut tx = engine.transaction();
        let house = tx
            .find_descendant(&".street.house2".parse()?)
            .expect("house2 exists");
        tx.update_attributes(house, &attrs(&[("height", "6"), ("color", "red6")]))?;
        tx.render()?;
    }

    // Transaction 3: the block is demolished.
    {
        let mut tx = engine.transaction();
        let root = tx.root();
        tx.remove_child(root, "street");
        tx.render()?;
    }

    drop(engine);
    consumer.join().ok();
    Ok(())
}
