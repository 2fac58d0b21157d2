//! Scripted drag session against the reference board.
//!
//! Usage: `snapline-playground [config.json]`. Run with `RUST_LOG=debug` to
//! see the component's own logging.

use kurbo::{Point, Size, Vec2};
use snapline_core::config::parse_hex_color;
use snapline_core::{Board, NodeId, Snap, SnapApp, SnapConfig, SnapMatch, SnapResult, ZoomLayer};

fn load_config() -> SnapResult<SnapConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .map_err(|e| snapline_core::SnapError::Config(format!("{path}: {e}")))?;
            log::info!("Loaded config from: {}", path);
            SnapConfig::from_json(&json)
        }
        None => Ok(SnapConfig::default()),
    }
}

/// The demo page: four boxes and the bounding box of a slanted line.
fn build_board() -> (Board, [NodeId; 5]) {
    let mut board = Board::new();
    if let Some(scene) = board.scene_mut() {
        scene.zoom = ZoomLayer::new(Size::new(1280.0, 800.0));
    }
    let ids = [
        board.add_rect(Point::new(200.0, 100.0), 100.0, 100.0),
        board.add_rect(Point::new(300.0, 300.0), 100.0, 100.0),
        board.add_rect(Point::new(500.0, 100.0), 500.0, 200.0),
        board.add_rect(Point::new(100.0, 200.0), 100.0, 100.0),
        board.add_rect(Point::new(400.0, 200.0), 50.0, 300.0),
    ];
    (board, ids)
}

fn report(board: &Board, label: &str, id: NodeId, result: Option<SnapMatch>) {
    let position = board.position(id).unwrap_or(Point::ZERO);
    match result {
        Some(result) if result.is_snapped() => log::info!(
            "{}: snapped by {:?} to ({}, {})",
            label,
            result.delta(),
            position.x,
            position.y
        ),
        Some(_) => log::info!("{}: no alignment at ({}, {})", label, position.x, position.y),
        None => log::info!("{}: ignored at ({}, {})", label, position.x, position.y),
    }

    if let Some(sky) = board.sky() {
        for line in sky.visible_lines() {
            log::info!(
                "  {} ({}, {}) -> ({}, {})",
                line.class_name,
                line.from.x,
                line.from.y,
                line.to.x,
                line.to.y
            );
        }
        let markers = sky.visible_markers().count();
        if markers > 0 {
            log::info!("  {} endpoint markers", markers);
        }
    }
}

fn run(config: SnapConfig) -> SnapResult<()> {
    let (mut board, [orange, yellow, _, purple, _]) = build_board();
    let mut snap = Snap::new(&board, config)?;
    snap.enable(&mut board, true);

    // Single shape drag
    board.select(&mut snap, &[yellow]);
    log::info!("{} snap targets in view", snap.candidate_count());
    let result = board.drag_by(&mut snap, yellow, Vec2::new(-96.0, -97.0));
    report(&board, "drag yellow", yellow, result);
    board.release(&mut snap);

    // The same distance counts for less once zoomed in
    if let Some(scene) = board.scene_mut() {
        scene.zoom.zoom_at(Point::new(400.0, 300.0), 2.0);
    }
    log::info!("Zoomed in, tolerance is now {}", snap.tolerance(&board));
    board.select(&mut snap, &[yellow]);
    let result = board.drag_by(&mut snap, yellow, Vec2::new(8.0, 0.0));
    report(&board, "drag yellow zoomed", yellow, result);
    board.release(&mut snap);
    if let Some(scene) = board.scene_mut() {
        scene.zoom.zoom_at(Point::new(400.0, 300.0), 0.5);
    }

    // Multi-selection drag through the proxy
    snap.line_color = parse_hex_color("#D2D4D7")?;
    snap.show_line_points = true;
    board.select(&mut snap, &[orange, purple]);
    board.begin_multi_drag();
    let result = board.drag_by(&mut snap, orange, Vec2::new(4.0, 2.0));
    report(&board, "drag orange + purple", orange, result);
    if let Some(position) = board.position(purple) {
        log::info!("  purple moved along to ({}, {})", position.x, position.y);
    }
    board.release(&mut snap);

    // Nothing happens while disabled
    snap.enable(&mut board, false);
    board.select(&mut snap, &[yellow]);
    let result = board.drag_by(&mut snap, yellow, Vec2::new(3.0, 3.0));
    report(&board, "drag yellow disabled", yellow, result);

    snap.destroy(&mut board);
    log::info!(
        "Destroyed, {} primitives left on the overlay",
        board.sky().map_or(0, |sky| sky.len())
    );
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Starting snapline playground");

    let result = load_config().and_then(run);
    if let Err(e) = result {
        log::error!("Playground failed: {}", e);
        std::process::exit(1);
    }
}
