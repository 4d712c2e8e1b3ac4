// world/ - Terrain queries
//
// Pure functions describing the canyon geometry.
// No state, no allocation, no time - just math.

mod terrain;

pub use terrain::*;
