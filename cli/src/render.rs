use mine_core::{Board, GameState, Result, Session, Tile};

fn tile_char(tile: Tile) -> char {
    match tile {
        Tile::Closed => '#',
        Tile::Open(0) => '.',
        Tile::Open(count) => char::from(b'0' + count),
        Tile::Flag => 'F',
        Tile::Exploded => 'X',
        Tile::Mine => '*',
        Tile::IncorrectFlag => 'x',
    }
}

pub fn face(state: GameState) -> &'static str {
    match state {
        GameState::NotStarted | GameState::InProgress => ":)",
        GameState::Won => "B)",
        GameState::Lost => ":(",
    }
}

/// Mine counter, face and timer, e.g. `010  :)  000`.
pub fn status_line(session: &Session) -> String {
    format!(
        "{}  {}  {}",
        session.mine_counter(),
        face(session.state()),
        session.timer_display()
    )
}

/// The grid with column numbers on top and row numbers on the left.
pub fn render_grid(board: &Board) -> Result<String> {
    let (rows, cols) = board.size();
    let mut out = String::from("    ");
    for col in 0..cols {
        out.push_str(&format!("{:>3}", col));
    }
    out.push('\n');

    for row in 0..rows {
        out.push_str(&format!("{:>3} ", row));
        for col in 0..cols {
            out.push_str(&format!("{:>3}", tile_char(board.tile_at((row, col))?)));
        }
        out.push('\n');
    }
    Ok(out)
}
