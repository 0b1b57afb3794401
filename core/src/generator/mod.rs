use crate::*;
pub use shuffle::*;

mod shuffle;

pub trait MineGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}
