use crate::board::Board;

/// Samples taken to build one seed, one per bit.
pub const SEED_BITS: u32 = 32;

/// Builds a seed from floating-input noise, sample `i` landing in bit `i`.
pub fn generate_seed<B: Board>(board: &mut B) -> u32 {
    let seed = (0..SEED_BITS).fold(0u32, |seed, bit| {
        seed | (u32::from(board.read_noise_bit()) << bit)
    });
    debug!("seed generated: {=u32:#x}", seed);
    seed
}
