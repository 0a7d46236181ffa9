//! Iso-level extraction on a sampled 2D field (marching squares).

use crate::foundation::core::{FieldSample2D, Line, Point};

/// Line segments where `field` crosses `level`.
///
/// A corner counts as "above" when its value is strictly greater than `level`, so a field
/// identically equal to `level` yields no segments. Cells touching a masked sample are
/// skipped. Saddle cells are split using the mean of their four corners.
pub fn contour_segments(field: &FieldSample2D, level: f64) -> Vec<Line> {
    let res = field.grid.resolution;
    let mut out = Vec::new();
    if res < 2 {
        return out;
    }

    for row in 0..res - 1 {
        for col in 0..res - 1 {
            let corners = [
                (col, row),
                (col + 1, row),
                (col + 1, row + 1),
                (col, row + 1),
            ];
            let mut values = [0.0; 4];
            let mut masked = false;
            for (slot, &(c, r)) in values.iter_mut().zip(&corners) {
                match field.get(c, r) {
                    Some(v) => *slot = v,
                    None => {
                        masked = true;
                        break;
                    }
                }
            }
            if masked {
                continue;
            }
            let points = corners.map(|(c, r)| field.grid.point(c, r));
            march_cell(&points, &values, level, &mut out);
        }
    }
    out
}

// Corner order: 0 = (x0,y0), 1 = (x1,y0), 2 = (x1,y1), 3 = (x0,y1).
// Edge e joins corner e and corner (e+1)%4: 0 bottom, 1 right, 2 top, 3 left.
fn march_cell(points: &[Point; 4], values: &[f64; 4], level: f64, out: &mut Vec<Line>) {
    let above = values.map(|v| v > level);
    let crossing = |e: usize| {
        let (a, b) = (e, (e + 1) % 4);
        let t = (level - values[a]) / (values[b] - values[a]);
        points[a].lerp(points[b], t)
    };

    let crossed: Vec<usize> = (0..4).filter(|&e| above[e] != above[(e + 1) % 4]).collect();
    match crossed.len() {
        2 => out.push(Line::new(crossing(crossed[0]), crossing(crossed[1]))),
        4 => {
            let center_above = values.iter().sum::<f64>() / 4.0 > level;
            // Pairs of edges meeting at corner c are (c-1, c): corner 0 -> edges 3,0.
            let around = |c: usize| Line::new(crossing((c + 3) % 4), crossing(c));
            // Isolate the corners on the minority side of the center value.
            let isolated = if above[0] == center_above { [1, 3] } else { [0, 2] };
            for c in isolated {
                out.push(around(c));
            }
        }
        _ => {}
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engines/contour.rs"]
mod tests;
