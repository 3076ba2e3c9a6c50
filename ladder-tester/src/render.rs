//! Plain-text ladder drawings for `--show`.

use ladder_game::{LadderDiagram, Permutation};

const GAP_WIDTH: usize = 3;

/// Draw `diagram` with rail labels on top and one line per interior row.
pub fn render_diagram(diagram: &LadderDiagram) -> String {
    let mut out = String::new();
    let rails = diagram.rail_count();

    let header: String = (0..rails)
        .map(|rail| format!("{rail:<width$}", width = GAP_WIDTH + 1))
        .collect();
    out.push_str(header.trim_end());
    out.push('\n');

    for row in 1..=diagram.steps() {
        let mut line = String::new();
        for rail in 0..rails {
            line.push('|');
            if rail + 1 < rails {
                let fill = if diagram.has_rung(rail, row) { '-' } else { ' ' };
                line.extend(std::iter::repeat_n(fill, GAP_WIDTH));
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// One `start -> terminal` line per rail.
pub fn render_permutation(permutation: &Permutation) -> String {
    permutation
        .iter()
        .map(|(start, terminal)| format!("  rail {start} -> terminal {terminal}\n"))
        .collect()
}
