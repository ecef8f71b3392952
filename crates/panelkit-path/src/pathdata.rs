//! Path-string interchange.
//!
//! Joinery output is restricted to straight cuts, so the interchange format
//! only admits absolute `M`, `L`, and `Z` commands. Curves are rejected at
//! parse time rather than silently approximated.

use panelkit_core::{PathOpError, PathOpResult, Point, Polygon};

/// Serializes one closed outline as an SVG path data string (`M .. L .. Z`).
/// A degenerate polygon serializes to an empty string.
pub fn to_path_string(polygon: &Polygon) -> String {
    if polygon.is_degenerate() {
        return String::new();
    }
    let mut out = String::new();
    for (i, p) in polygon.points.iter().enumerate() {
        if i == 0 {
            out.push_str(&format!("M {:.3} {:.3}", p.x, p.y));
        } else {
            out.push_str(&format!(" L {:.3} {:.3}", p.x, p.y));
        }
    }
    out.push_str(" Z");
    out
}

/// Parses path data containing absolute `M`/`L`/`Z` commands into closed
/// outlines, one polygon per subpath. Coordinates after an `M` without an
/// explicit `L` follow SVG semantics and are treated as line-to.
pub fn from_path_string(data: &str) -> PathOpResult<Vec<Polygon>> {
    let tokens: Vec<&str> = data
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();

    let mut polygons = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    let mut i = 0;

    let parse_coord = |tokens: &[&str], idx: usize| -> PathOpResult<f64> {
        let token = tokens.get(idx).ok_or_else(|| PathOpError::Parse {
            position: idx,
            detail: "expected coordinate, found end of data".to_string(),
        })?;
        token.parse::<f64>().map_err(|_| PathOpError::Parse {
            position: idx,
            detail: format!("expected coordinate, found '{}'", token),
        })
    };

    while i < tokens.len() {
        match tokens[i] {
            "M" | "L" => {
                if tokens[i] == "M" && !current.is_empty() {
                    polygons.push(Polygon::new(std::mem::take(&mut current)));
                }
                i += 1;
                // Consume coordinate pairs until the next command token.
                loop {
                    let x = parse_coord(&tokens, i)?;
                    let y = parse_coord(&tokens, i + 1)?;
                    current.push(Point::new(x, y));
                    i += 2;
                    let next_is_coord = tokens
                        .get(i)
                        .map(|t| t.parse::<f64>().is_ok())
                        .unwrap_or(false);
                    if !next_is_coord {
                        break;
                    }
                }
            }
            "Z" | "z" => {
                if !current.is_empty() {
                    polygons.push(Polygon::new(std::mem::take(&mut current)));
                }
                i += 1;
            }
            other => {
                return Err(PathOpError::Parse {
                    position: i,
                    detail: format!("unsupported path command '{}'", other),
                });
            }
        }
    }

    if !current.is_empty() {
        polygons.push(Polygon::new(current));
    }
    Ok(polygons)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_square() {
        let square = Polygon::rect(0.0, 0.0, 10.0, 5.0);
        assert_eq!(
            to_path_string(&square),
            "M 0.000 0.000 L 10.000 0.000 L 10.000 5.000 L 0.000 5.000 Z"
        );
    }

    #[test]
    fn test_serialize_degenerate_is_empty() {
        let line = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert_eq!(to_path_string(&line), "");
    }

    #[test]
    fn test_parse_round_trip() {
        let square = Polygon::rect(2.5, -1.0, 7.0, 3.0);
        let parsed = from_path_string(&to_path_string(&square)).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0], square);
    }

    #[test]
    fn test_parse_multiple_subpaths() {
        let parsed = from_path_string("M 0 0 L 10 0 L 10 10 Z M 20 0 L 30 0 L 30 10 Z").unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].points[0], Point::new(20.0, 0.0));
    }

    #[test]
    fn test_parse_implicit_line_to() {
        let parsed = from_path_string("M 0 0 10 0 10 10 Z").unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].points.len(), 3);
    }

    #[test]
    fn test_parse_rejects_curves() {
        let err = from_path_string("M 0 0 C 1 1 2 2 3 3 Z").unwrap_err();
        assert!(matches!(err, PathOpError::Parse { .. }));
        assert!(err.to_string().contains('C'));
    }

    #[test]
    fn test_parse_rejects_truncated_pair() {
        let err = from_path_string("M 0 0 L 10").unwrap_err();
        assert!(matches!(err, PathOpError::Parse { .. }));
    }
}
