use rand::Rng;

pub const GRID_SIZE: i32 = 20;
pub const POINTS_PER_FOOD: u32 = 10;

/// Grid cell as (row, col). (0, 0) is the top-left corner.
pub type Cell = (i32, i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Classic snake on a fixed 20x20 grid.
///
/// `steer` buffers at most one turn per tick; the buffered turn is applied at
/// the start of the next `tick` so two quick key presses cannot fold the
/// snake back onto its own neck.
#[derive(Debug, Clone)]
pub struct SnakeGame {
    body: Vec<Cell>,
    food: Cell,
    direction: Direction,
    pending_direction: Direction,
    score: u32,
    game_over: bool,
}

impl SnakeGame {
    pub fn new() -> Self {
        SnakeGame {
            body: vec![(10, 10)],
            food: (15, 15),
            direction: Direction::Right,
            pending_direction: Direction::Right,
            score: 0,
            game_over: false,
        }
    }

    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Buffers a direction change for the next tick. Reversals relative to
    /// the direction of travel are ignored.
    pub fn steer(&mut self, direction: Direction) {
        if self.game_over || direction == self.direction.opposite() {
            return;
        }
        self.pending_direction = direction;
    }

    /// Advances the snake by one cell. Hitting a wall or the body ends the
    /// game; eating food grows the snake and relocates the food onto a free
    /// cell chosen uniformly at random.
    pub fn tick(&mut self, rng: &mut impl Rng) {
        if self.game_over {
            return;
        }
        self.direction = self.pending_direction;
        let (dr, dc) = self.direction.delta();
        let head = self.head();
        let next = (head.0 + dr, head.1 + dc);

        let out_of_bounds =
            next.0 < 0 || next.0 >= GRID_SIZE || next.1 < 0 || next.1 >= GRID_SIZE;
        if out_of_bounds || self.body.contains(&next) {
            self.game_over = true;
            return;
        }

        self.body.insert(0, next);
        if next == self.food {
            self.score += POINTS_PER_FOOD;
            self.place_food(rng);
        } else {
            self.body.pop();
        }
    }

    fn place_food(&mut self, rng: &mut impl Rng) {
        let mut free: Vec<Cell> = Vec::new();
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let cell = (row, col);
                if !self.body.contains(&cell) {
                    free.push(cell);
                }
            }
        }
        if free.is_empty() {
            // The snake fills the board; leave the food where it is.
            self.game_over = true;
            return;
        }
        self.food = free[rng.gen_range(0..free.len())];
    }
}

impl Default for SnakeGame {
    fn default() -> Self {
        SnakeGame::new()
    }
}
