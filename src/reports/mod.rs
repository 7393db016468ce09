use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use planeforge::board::Board;
use planeforge::engine::{GuessPoint, Move, Outcome};
use planeforge::geometry::{Plane, Point};
use planeforge::simulation::SimulationReport;

/// One turn of a played game, as shown in the probe log.
pub struct ProbeRecord {
    pub turn: usize,
    pub mv: Move,
    pub outcome: Outcome,
    pub confirmed: Vec<Plane>,
}

fn board_cell(board: &Board, probes: &[GuessPoint], p: Point) -> Cell {
    let probe = probes.iter().find(|gp| gp.point() == p).map(|gp| gp.outcome);
    let occupant = board.plane_at(p);

    let (text, color) = match (probe, occupant) {
        (Some(Outcome::Dead), _) => ("X", Some(Color::Red)),
        (Some(Outcome::Hit), _) => ("*", Some(Color::Yellow)),
        (Some(Outcome::Miss), _) => ("o", Some(Color::Blue)),
        (None, Some((_, true))) => ("H", None),
        (None, Some((_, false))) => ("#", None),
        (None, None) => (" ", None),
    };

    let cell = Cell::new(text).set_alignment(CellAlignment::Center);
    match color {
        Some(c) => cell.fg(c),
        None => cell,
    }
}

pub fn print_board_grid(name: &str, board: &Board, rows: i32, cols: i32, probes: &[GuessPoint]) {
    println!("\nBoard: {}", name);
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let mut header = vec![Cell::new("")];
    header.extend((0..cols).map(|c| Cell::new(c).add_attribute(Attribute::Bold)));
    table.add_row(header);

    for r in 0..rows {
        let mut cells = vec![Cell::new(r).add_attribute(Attribute::Bold)];
        cells.extend((0..cols).map(|c| board_cell(board, probes, Point::new(r, c))));
        table.add_row(cells);
    }
    println!("{}", table);
}

pub fn print_probe_log(records: &[ProbeRecord]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Cell"),
        Cell::new("Strategy"),
        Cell::new("Result"),
        Cell::new("Confirmed").fg(Color::Green),
    ]);

    if let Some(col) = table.column_mut(0) {
        col.set_cell_alignment(CellAlignment::Right);
    }

    for rec in records {
        let result = match rec.outcome {
            Outcome::Dead => Cell::new(rec.outcome).fg(Color::Red),
            Outcome::Hit => Cell::new(rec.outcome).fg(Color::Yellow),
            Outcome::Miss => Cell::new(rec.outcome),
        };
        let confirmed = rec
            .confirmed
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        table.add_row(vec![
            Cell::new(rec.turn),
            Cell::new(rec.mv.point),
            Cell::new(rec.mv.strategy),
            result,
            Cell::new(confirmed).fg(Color::Green),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_simulation_report(report: &SimulationReport) {
    let s = &report.summary;
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Games").add_attribute(Attribute::Bold),
        Cell::new("Solved").fg(Color::Green),
        Cell::new("Solve %"),
        Cell::new("Min"),
        Cell::new("Mean").fg(Color::Cyan),
        Cell::new("Max"),
        Cell::new("Misses"),
    ]);

    for i in 0..=6 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    let solve_pct = if s.games > 0 {
        s.solved as f64 / s.games as f64 * 100.0
    } else {
        0.0
    };

    table.add_row(vec![
        Cell::new(s.games).add_attribute(Attribute::Bold),
        Cell::new(s.solved).fg(Color::Green),
        Cell::new(format!("{:.1}%", solve_pct)),
        Cell::new(s.min_moves),
        Cell::new(format!("{:.2}", s.mean_moves)).fg(Color::Cyan),
        Cell::new(s.max_moves),
        Cell::new(format!("{:.2}", s.mean_misses)),
    ]);
    println!("\n{}", table);
}
