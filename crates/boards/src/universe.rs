//! The memoized universe of every reachable 3x3 board.
//!
//! All boards reachable from the empty board by either player marking any
//! empty cell (stopping at won boards) are built once, deduplicated by content
//! and stored in an arena. Each board keeps its winner, its legal-move bitmask
//! and a table of child ids, so playing a move during search is a single
//! index lookup. The arena is read-only after construction and is meant to be
//! shared behind an `Arc`.

use std::collections::HashMap;

use tracing::debug;
use ultimatoe_core::Player;

/// Cells per board.
pub const AREA: usize = 9;

/// Winning triples: rows, columns, diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Index of a board in the universe arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardId(u32);

impl BoardId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One precomputed 3x3 board.
#[derive(Clone, Debug)]
pub struct BoardNode {
    /// Content packed two bits per cell: 0 empty, 1 X, 2 O.
    content: u32,
    cells: [Option<Player>; AREA],
    turn: u8,
    winner: Option<Player>,
    /// Bit `i` set iff cell `i` is empty and the board is undecided.
    possibilities: u16,
    /// Child reached by `player` marking `cell`, at `2 * cell + player.index()`.
    children: [Option<BoardId>; 2 * AREA],
}

impl BoardNode {
    pub fn content(&self) -> u32 {
        self.content
    }

    pub fn cells(&self) -> &[Option<Player>; AREA] {
        &self.cells
    }

    /// Number of marks on the board.
    pub fn turn(&self) -> u8 {
        self.turn
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn possibilities(&self) -> u16 {
        self.possibilities
    }

    pub fn is_playable(&self, cell: usize) -> bool {
        cell < AREA && self.possibilities & (1 << cell) != 0
    }

    /// A board is finished once it is won or full.
    pub fn is_finished(&self) -> bool {
        self.possibilities == 0
    }
}

/// Arena of every reachable board plus the content-keyed dedup table.
#[derive(Debug)]
pub struct BoardUniverse {
    nodes: Vec<BoardNode>,
    index: HashMap<u32, BoardId>,
    empty: BoardId,
}

impl BoardUniverse {
    /// Enumerate all reachable boards starting from the empty one.
    pub fn build() -> Self {
        let mut universe = Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            empty: BoardId(0),
        };
        universe.empty = universe.intern(0);
        debug!(boards = universe.nodes.len(), "board universe built");
        universe
    }

    /// The board with no marks.
    pub fn empty(&self) -> BoardId {
        self.empty
    }

    pub fn node(&self, id: BoardId) -> &BoardNode {
        &self.nodes[id.index()]
    }

    /// Board resulting from `player` marking `cell`, or `None` if the cell is
    /// not playable.
    pub fn child(&self, id: BoardId, cell: usize, player: Player) -> Option<BoardId> {
        if cell >= AREA {
            return None;
        }
        self.node(id).children[child_slot(cell, player)]
    }

    pub fn winner(&self, id: BoardId) -> Option<Player> {
        self.node(id).winner
    }

    pub fn possibilities(&self, id: BoardId) -> u16 {
        self.node(id).possibilities
    }

    pub fn is_playable(&self, id: BoardId, cell: usize) -> bool {
        self.node(id).is_playable(cell)
    }

    pub fn is_finished(&self, id: BoardId) -> bool {
        self.node(id).is_finished()
    }

    /// Mark in the given cell, if any.
    pub fn get(&self, id: BoardId, cell: usize) -> Option<Player> {
        self.node(id).cells.get(cell).copied().flatten()
    }

    /// Look a board up by its packed content.
    pub fn lookup(&self, content: u32) -> Option<BoardId> {
        self.index.get(&content).copied()
    }

    /// Number of distinct reachable boards.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = BoardId> {
        (0..self.nodes.len() as u32).map(BoardId)
    }

    /// Return the id for `content`, building it and all its descendants first
    /// if it has not been seen yet.
    fn intern(&mut self, content: u32) -> BoardId {
        if let Some(&id) = self.index.get(&content) {
            return id;
        }

        let cells = decode(content);
        let winner = compute_winner(&cells);
        let mut possibilities = 0u16;
        let mut children = [None; 2 * AREA];
        if winner.is_none() {
            for player in Player::ALL {
                for cell in 0..AREA {
                    if cells[cell].is_some() {
                        continue;
                    }
                    let child = self.intern(content + (code(player) << (2 * cell)));
                    children[child_slot(cell, player)] = Some(child);
                    possibilities |= 1 << cell;
                }
            }
        }

        let id = BoardId(self.nodes.len() as u32);
        self.nodes.push(BoardNode {
            content,
            cells,
            turn: cells.iter().filter(|c| c.is_some()).count() as u8,
            winner,
            possibilities,
            children,
        });
        self.index.insert(content, id);
        id
    }
}

fn child_slot(cell: usize, player: Player) -> usize {
    2 * cell + player.index()
}

fn code(player: Player) -> u32 {
    match player {
        Player::X => 1,
        Player::O => 2,
    }
}

/// Unpack a content key.
///
/// # Panics
/// Panics on the unused cell code 3; the universe is only ever built from
/// well-formed content, so this means the enumeration itself is broken.
fn decode(content: u32) -> [Option<Player>; AREA] {
    let mut cells = [None; AREA];
    for (i, cell) in cells.iter_mut().enumerate() {
        *cell = match (content >> (2 * i)) & 3 {
            0 => None,
            1 => Some(Player::X),
            2 => Some(Player::O),
            other => panic!("malformed board content {content:#x}: cell {i} has code {other}"),
        };
    }
    cells
}

/// Winner of a 3x3 grid of cells.
pub fn compute_winner(cells: &[Option<Player>]) -> Option<Player> {
    LINES.iter().find_map(|line| {
        let player = cells[line[0]]?;
        (cells[line[1]] == Some(player) && cells[line[2]] == Some(player)).then_some(player)
    })
}
