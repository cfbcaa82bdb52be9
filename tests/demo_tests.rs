mod common;

use astar_demo::{
    Brush, CellKind, Config, CostModel, Demo, GridEdit, GridError, LayoutError, Outcome, Position,
    SearchStatus,
};
use common::{assert_connected, visualize};

fn default_demo() -> Demo {
    Demo::from_config(&Config::default()).unwrap()
}

#[test]
fn test_default_scene() {
    let demo = default_demo();
    let grid = demo.grid();

    assert_eq!((grid.width(), grid.height()), (40, 30));
    assert_eq!(demo.start(), Position::new(20, 0));
    assert_eq!(demo.end(), Position::new(20, 16));
    assert_eq!(grid.get(20, 0).unwrap().kind(), CellKind::Start);
    assert_eq!(grid.get(20, 16).unwrap().kind(), CellKind::End);

    let walls = grid.positions_of(CellKind::Wall);
    assert_eq!(walls.len(), 20);
    assert!(walls.iter().all(|w| w.y == 15 && (10..30).contains(&w.x)));
    assert_eq!(demo.status(), SearchStatus::Idle);
}

#[test]
fn test_default_scene_search() {
    let mut demo = default_demo();

    let outcome = demo.run_to_completion().unwrap();

    let path = outcome.path().expect("default wall leaves room on both sides");
    assert_connected(path);
    assert_eq!(path.len(), 26, "{}", visualize(demo.grid()));
    assert_eq!(demo.status(), SearchStatus::Succeeded);
    assert_eq!(demo.last_outcome(), Some(&outcome));
}

#[test]
fn test_small_cells_give_twenty_by_fifteen_scene() {
    let config = Config::from_toml_str("[grid]\ncell_size = 40\n").unwrap();
    let mut demo = Demo::from_config(&config).unwrap();

    assert_eq!((demo.grid().width(), demo.grid().height()), (20, 15));
    assert_eq!(demo.start(), Position::new(10, 0));
    assert_eq!(demo.end(), Position::new(10, 8));

    let outcome = demo.run_to_completion().unwrap();
    let path = outcome.path().unwrap();
    assert_eq!(path.len(), 13);
    assert!(path.contains(&Position::new(15, 7)));
}

#[test]
fn test_stepping_with_tick() {
    let mut demo = default_demo();

    assert!(demo.trigger_search().unwrap());
    assert!(demo.is_running());

    assert_eq!(demo.tick(1), None);
    assert_eq!(demo.status(), SearchStatus::Running);
    assert_eq!(demo.expansions(), Some(1));

    assert_eq!(demo.tick(4), None);
    assert_eq!(demo.expansions(), Some(5));

    let mut frames = 0;
    let outcome = loop {
        frames += 1;
        if let Some(outcome) = demo.tick(10) {
            break outcome;
        }
    };
    assert!(frames > 1);
    assert!(outcome.is_success());
    assert!(!demo.is_running());
    assert_eq!(demo.expansions(), None);
    assert_eq!(demo.tick(1), None);
}

#[test]
fn test_edits_ignored_while_running() {
    let mut demo = default_demo();
    demo.trigger_search().unwrap();

    let edit = GridEdit::new(0, 29, Brush::Wall);
    assert_eq!(demo.apply_edit(edit), Ok(false));
    assert_eq!(demo.grid().get(0, 29).unwrap().kind(), CellKind::Empty);

    // A second trigger does not start another search
    assert_eq!(demo.trigger_search(), Ok(false));

    demo.run_to_completion().unwrap();
    assert_eq!(demo.apply_edit(edit), Ok(true));
    assert_eq!(demo.grid().get(0, 29).unwrap().kind(), CellKind::Wall);
}

#[test]
fn test_edits_do_not_touch_endpoints() {
    let mut demo = default_demo();

    assert_eq!(demo.apply_edit(GridEdit::new(20, 0, Brush::Wall)), Ok(false));
    assert_eq!(demo.apply_edit(GridEdit::new(20, 16, Brush::Empty)), Ok(false));
    assert_eq!(demo.grid().count(CellKind::Start), 1);
    assert_eq!(demo.grid().count(CellKind::End), 1);

    // Erasing a wall works, erasing it twice reports no change
    assert_eq!(demo.apply_edit(GridEdit::new(10, 15, Brush::Empty)), Ok(true));
    assert_eq!(demo.apply_edit(GridEdit::new(10, 15, Brush::Empty)), Ok(false));

    assert!(matches!(
        demo.apply_edit(GridEdit::new(40, 0, Brush::Wall)),
        Err(GridError::OutOfBounds { .. })
    ));
}

#[test]
fn test_pointer_translation() {
    let demo = default_demo();
    let grid = demo.grid();

    assert_eq!(
        GridEdit::from_pointer(0.0, 0.0, 20.0, Brush::Wall, grid),
        Some(GridEdit::new(0, 0, Brush::Wall))
    );
    assert_eq!(
        GridEdit::from_pointer(799.0, 599.0, 20.0, Brush::Empty, grid),
        Some(GridEdit::new(39, 29, Brush::Empty))
    );
    assert_eq!(
        GridEdit::from_pointer(45.0, 19.9, 20.0, Brush::Wall, grid),
        Some(GridEdit::new(2, 0, Brush::Wall))
    );

    assert_eq!(GridEdit::from_pointer(800.0, 10.0, 20.0, Brush::Wall, grid), None);
    assert_eq!(GridEdit::from_pointer(10.0, 600.0, 20.0, Brush::Wall, grid), None);
    assert_eq!(GridEdit::from_pointer(-0.5, 10.0, 20.0, Brush::Wall, grid), None);
    assert_eq!(GridEdit::from_pointer(10.0, 10.0, 0.0, Brush::Wall, grid), None);
}

#[test]
fn test_reset_then_rerun_matches() {
    let mut demo = default_demo();

    let first = demo.run_to_completion().unwrap();
    let first_path = demo.grid().positions_of(CellKind::FinalPath);

    demo.reset();
    assert_eq!(demo.status(), SearchStatus::Idle);
    assert_eq!(demo.grid().count(CellKind::FinalPath), 0);
    assert_eq!(demo.grid().count(CellKind::Visited), 0);
    assert_eq!(demo.grid().count(CellKind::Wall), 20);

    let second = demo.run_to_completion().unwrap();
    assert_eq!(first, second);
    assert_eq!(demo.grid().positions_of(CellKind::FinalPath), first_path);
}

#[test]
fn test_reset_cancels_running_search() {
    let mut demo = default_demo();
    demo.trigger_search().unwrap();
    demo.tick(3);

    demo.reset();

    assert!(!demo.is_running());
    assert_eq!(demo.status(), SearchStatus::Idle);
    assert_eq!(demo.grid().count(CellKind::Visited), 0);
    assert_eq!(demo.grid().count(CellKind::Frontier), 0);
    assert_eq!(demo.tick(1), None);
}

#[test]
fn test_clear_removes_walls() {
    let mut demo = default_demo();
    demo.run_to_completion().unwrap();

    demo.clear();
    assert_eq!(demo.grid().count(CellKind::Wall), 0);
    assert_eq!(demo.grid().count(CellKind::FinalPath), 0);

    let outcome = demo.run_to_completion().unwrap();
    assert_eq!(outcome.path().unwrap().len(), 17);
}

#[test]
fn test_blocked_end_reports_no_path() {
    let mut demo =
        Demo::new(5, 5, Position::new(0, 0), Position::new(4, 4), CostModel::FromStart).unwrap();
    for pos in [(3, 3), (3, 4), (4, 3)] {
        demo.apply_edit(GridEdit::new(pos.0, pos.1, Brush::Wall)).unwrap();
    }

    let outcome = demo.run_to_completion().unwrap();

    assert_eq!(outcome, Outcome::Exhausted);
    assert_eq!(demo.status(), SearchStatus::Exhausted);
    assert_eq!(demo.grid().count(CellKind::FinalPath), 0);
}

#[test]
fn test_cost_model_switch() {
    let mut demo = default_demo();
    assert_eq!(demo.cost_model(), CostModel::FromStart);

    demo.set_cost_model(CostModel::Accumulated);
    let outcome = demo.run_to_completion().unwrap();
    assert_eq!(outcome.path().unwrap().len(), 26);
}

#[test]
fn test_paste_walls() {
    let mut source =
        Demo::new(4, 3, Position::new(0, 0), Position::new(3, 2), CostModel::FromStart).unwrap();
    source.apply_edit(GridEdit::new(1, 0, Brush::Wall)).unwrap();
    source.apply_edit(GridEdit::new(1, 1, Brush::Wall)).unwrap();
    let text = source.layout_text();
    assert_eq!(text, "S#..\n.#..\n...E\n");

    let mut target =
        Demo::new(4, 3, Position::new(0, 0), Position::new(3, 2), CostModel::FromStart).unwrap();
    target.apply_edit(GridEdit::new(2, 2, Brush::Wall)).unwrap();
    target.paste_walls(&text).unwrap();
    assert_eq!(target.layout_text(), text);

    let mut wrong_size = default_demo();
    assert!(matches!(
        wrong_size.paste_walls(&text),
        Err(LayoutError::DimensionMismatch { .. })
    ));
    assert_eq!(wrong_size.grid().count(CellKind::Wall), 20);

    assert!(wrong_size.paste_walls("not a layout").is_err());
}

#[test]
fn test_rejected_paste_keeps_search_running() {
    let mut demo = default_demo();
    assert!(demo.trigger_search().unwrap());
    assert_eq!(demo.tick(3), None);

    assert!(matches!(
        demo.paste_walls("S.\n.E\n"),
        Err(LayoutError::DimensionMismatch {
            width: 40,
            height: 30,
            found_width: 2,
            found_height: 2
        })
    ));
    assert!(demo.paste_walls("not a layout").is_err());

    assert!(demo.is_running());
    assert_eq!(demo.status(), SearchStatus::Running);
    assert_eq!(demo.expansions(), Some(3));
    assert_eq!(demo.grid().count(CellKind::Wall), 20);

    let outcome = demo.run_to_completion().unwrap();
    assert_eq!(outcome.path().map(|path| path.len()), Some(26));
}

#[test]
fn test_endpoints_out_of_bounds() {
    let result = Demo::new(5, 5, Position::new(5, 0), Position::new(1, 1), CostModel::FromStart);
    assert!(matches!(result, Err(GridError::OutOfBounds { x: 5, y: 0, .. })));
}
