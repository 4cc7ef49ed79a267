use polysweep_core::{Board, Cell, Visibility};

/// Text token for one cell. Hidden mines are only shown when `show_mines` is set.
fn cell_token(cell: Cell, show_mines: bool) -> String {
    match cell.visibility {
        Visibility::Revealed(_) if cell.has_mine() => format!("*{}", cell.mine),
        Visibility::Revealed(None) => ".".to_owned(),
        Visibility::Revealed(Some(number)) => number.to_string(),
        Visibility::Flagged(flag) => format!("F{flag}"),
        Visibility::Hidden if show_mines && cell.has_mine() => format!("m{}", cell.mine),
        Visibility::Hidden => "#".to_owned(),
    }
}

pub fn render(board: &Board, show_mines: bool) -> String {
    let (height, width) = board.size();
    let mut out = String::new();

    for row in 0..height {
        for col in 0..width {
            out += &format!("{:>3}", cell_token(board[(row, col)], show_mines));
        }
        out.push('\n');
    }
    out
}
