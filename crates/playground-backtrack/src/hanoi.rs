//! Tower of Hanoi: optimal move generation and peg state.

/// Number of pegs.
pub const PEG_COUNT: usize = 3;

/// Fewest and most disks accepted; other counts are clamped.
pub const MIN_DISKS: u32 = 1;
pub const MAX_DISKS: u32 = 10;

/// Move the top disk of one peg onto another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HanoiMove {
    pub from: usize,
    pub to: usize,
}

/// The optimal `2^n - 1` moves that carry `n` disks from `from` to `to`.
/// `n` above [`MAX_DISKS`] is clamped.
pub fn hanoi_moves(n: u32, from: usize, to: usize, aux: usize) -> Vec<HanoiMove> {
    let n = n.min(MAX_DISKS);
    let mut moves = Vec::with_capacity(optimal_moves(n) as usize);
    push_moves(n, from, to, aux, &mut moves);
    moves
}

fn push_moves(n: u32, from: usize, to: usize, aux: usize, moves: &mut Vec<HanoiMove>) {
    if n == 0 {
        return;
    }
    push_moves(n - 1, from, aux, to, moves);
    moves.push(HanoiMove { from, to });
    push_moves(n - 1, aux, to, from, moves);
}

/// `2^n - 1`, with `n` clamped to [`MAX_DISKS`].
pub fn optimal_moves(n: u32) -> u64 {
    (1u64 << n.min(MAX_DISKS)) - 1
}

/// Three pegs of disks, largest (highest number) at the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Towers {
    disks: u32,
    pegs: [Vec<u32>; PEG_COUNT],
    moves: u64,
}

impl Towers {
    /// All disks stacked on peg 0. `disks` is clamped to
    /// `MIN_DISKS..=MAX_DISKS`.
    pub fn new(disks: u32) -> Self {
        let disks = disks.clamp(MIN_DISKS, MAX_DISKS);
        Self {
            disks,
            pegs: [(1..=disks).rev().collect(), Vec::new(), Vec::new()],
            moves: 0,
        }
    }

    pub fn disks(&self) -> u32 {
        self.disks
    }

    pub fn pegs(&self) -> &[Vec<u32>; PEG_COUNT] {
        &self.pegs
    }

    /// Moves applied so far.
    pub fn moves(&self) -> u64 {
        self.moves
    }

    /// Move the top disk. An empty source or an unknown peg leaves the
    /// towers untouched and returns false.
    pub fn apply(&mut self, mv: HanoiMove) -> bool {
        if mv.from >= PEG_COUNT || mv.to >= PEG_COUNT {
            return false;
        }
        let Some(disk) = self.pegs[mv.from].pop() else {
            return false;
        };
        self.pegs[mv.to].push(disk);
        self.moves += 1;
        true
    }

    /// Whether `mv` would put a disk on a smaller one.
    pub fn is_legal(&self, mv: HanoiMove) -> bool {
        if mv.from >= PEG_COUNT || mv.to >= PEG_COUNT {
            return false;
        }
        match (self.pegs[mv.from].last(), self.pegs[mv.to].last()) {
            (Some(disk), Some(top)) => disk < top,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// Every disk sits on the last peg.
    pub fn is_complete(&self) -> bool {
        self.pegs[PEG_COUNT - 1].len() == self.disks as usize
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.disks);
    }
}

/// A generated solution being played back onto the towers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HanoiRun {
    towers: Towers,
    solution: Vec<HanoiMove>,
    cursor: usize,
}

impl HanoiRun {
    pub fn new(disks: u32) -> Self {
        let towers = Towers::new(disks);
        let solution = hanoi_moves(towers.disks(), 0, PEG_COUNT - 1, 1);
        Self {
            towers,
            solution,
            cursor: 0,
        }
    }

    pub fn towers(&self) -> &Towers {
        &self.towers
    }

    pub fn solution(&self) -> &[HanoiMove] {
        &self.solution
    }

    /// Index of the next move to play.
    pub fn current_step(&self) -> usize {
        self.cursor
    }

    /// Play the next move, if any remain.
    pub fn step_forward(&mut self) -> Option<HanoiMove> {
        let mv = *self.solution.get(self.cursor)?;
        self.towers.apply(mv);
        self.cursor += 1;
        if self.cursor == self.solution.len() {
            tracing::debug!(
                disks = self.towers.disks(),
                moves = self.towers.moves(),
                "hanoi solved"
            );
        }
        Some(mv)
    }

    pub fn is_done(&self) -> bool {
        self.cursor >= self.solution.len()
    }

    pub fn reset(&mut self) {
        self.towers.reset();
        self.cursor = 0;
    }
}
