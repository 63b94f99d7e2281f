//! Keyboard layouts and the adjacency graphs derived from them.
//!
//! Layouts are carried as literal key grids. Slanted layouts (typewriter
//! rows offset horizontally) get a hexagonal 6-neighbor adjacency; aligned
//! layouts (numeric keypads) get the full 8 directions. Each cell of a
//! slanted layout holds the unshifted and shifted character of one key.

use std::collections::HashMap;

const QWERTY: &str = r#"
`~ 1! 2@ 3# 4$ 5% 6^ 7& 8* 9( 0) -_ =+
    qQ wW eE rR tT yY uU iI oO pP [{ ]} \|
     aA sS dD fF gG hH jJ kK lL ;: '"
      zZ xX cC vV bB nN mM ,< .> /?
"#;

const DVORAK: &str = r#"
`~ 1! 2@ 3# 4$ 5% 6^ 7& 8* 9( 0) [{ ]}
    '" ,< .> pP yY fF gG cC rR lL /? =+ \|
     aA oO eE uU iI dD hH tT nN sS -_
      ;: qQ jJ kK xX bB mM wW vV zZ
"#;

const KEYPAD: &str = r"
  / * -
7 8 9 +
4 5 6
1 2 3
  0 .
";

const MAC_KEYPAD: &str = r"
  = / *
7 8 9 -
4 5 6 +
1 2 3
  0 .
";

/// An adjacency graph built from one keyboard layout.
pub struct SpatialGraph {
    /// Layout name carried into the matches it produces.
    pub name: &'static str,
    /// Per-character neighbor cells, one slot per direction. An off-grid
    /// neighbor still occupies its slot so that direction indices stay
    /// consistent across keys.
    adjacencies: HashMap<char, Vec<Option<String>>>,
    /// Number of keys with at least one neighbor.
    pub starting_positions: usize,
    /// Mean number of non-empty neighbor slots per starting position.
    pub average_degree: f64,
}

impl SpatialGraph {
    fn from_layout(name: &'static str, layout: &str, slanted: bool) -> SpatialGraph {
        let token_size = layout
            .split_whitespace()
            .next()
            .map(|t| t.chars().count())
            .unwrap_or(1);
        let x_unit = (token_size + 1) as i32;

        let mut positions: HashMap<(i32, i32), String> = HashMap::new();
        for (y, line) in layout.lines().enumerate() {
            let y = y as i32;
            let slant = if slanted { y - 1 } else { 0 };
            for (offset, cell) in tokens_with_offsets(line) {
                let x = (offset as i32 - slant) / x_unit;
                positions.insert((x, y), cell);
            }
        }

        let mut adjacencies: HashMap<char, Vec<Option<String>>> = HashMap::new();
        for (&(x, y), cell) in &positions {
            for c in cell.chars() {
                let neighbors = neighbor_coords(x, y, slanted)
                    .into_iter()
                    .map(|coord| positions.get(&coord).cloned())
                    .collect::<Vec<_>>();
                adjacencies.insert(c, neighbors);
            }
        }

        let starting_positions = adjacencies
            .values()
            .filter(|neighbors| neighbors.iter().any(Option::is_some))
            .count();
        let slots: usize = adjacencies
            .values()
            .map(|neighbors| neighbors.iter().filter(|slot| slot.is_some()).count())
            .sum();
        let average_degree = slots as f64 / starting_positions as f64;

        SpatialGraph {
            name,
            adjacencies,
            starting_positions,
            average_degree,
        }
    }

    /// Direction slot holding `to` among `from`'s neighbors, along with
    /// whether `to` is the shifted character of that key.
    pub fn direction_of(&self, from: char, to: char) -> Option<(usize, bool)> {
        let neighbors = self.adjacencies.get(&from)?;
        for (direction, slot) in neighbors.iter().enumerate() {
            if let Some(cell) = slot {
                if let Some(pos) = cell.chars().position(|c| c == to) {
                    return Some((direction, pos >= 1));
                }
            }
        }
        None
    }
}

fn tokens_with_offsets(line: &str) -> Vec<(usize, String)> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut start = 0;
    for (idx, c) in line.char_indices() {
        if c == ' ' {
            if !current.is_empty() {
                tokens.push((start, std::mem::take(&mut current)));
            }
        } else {
            if current.is_empty() {
                start = idx;
            }
            current.push(c);
        }
    }
    if !current.is_empty() {
        tokens.push((start, current));
    }
    tokens
}

fn neighbor_coords(x: i32, y: i32, slanted: bool) -> Vec<(i32, i32)> {
    if slanted {
        // west, north-west, north-east, east, south-east, south-west
        vec![
            (x - 1, y),
            (x, y - 1),
            (x + 1, y - 1),
            (x + 1, y),
            (x, y + 1),
            (x - 1, y + 1),
        ]
    } else {
        // west, north-west, north, north-east, east, south-east, south, south-west
        vec![
            (x - 1, y),
            (x - 1, y - 1),
            (x, y - 1),
            (x + 1, y - 1),
            (x + 1, y),
            (x + 1, y + 1),
            (x, y + 1),
            (x - 1, y + 1),
        ]
    }
}

lazy_static! {
    pub static ref GRAPHS: Vec<SpatialGraph> = vec![
        SpatialGraph::from_layout("qwerty", QWERTY, true),
        SpatialGraph::from_layout("dvorak", DVORAK, true),
        SpatialGraph::from_layout("keypad", KEYPAD, false),
        SpatialGraph::from_layout("mac_keypad", MAC_KEYPAD, false),
    ];
}
