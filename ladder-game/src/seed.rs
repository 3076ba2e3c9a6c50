//! Reversible session codes with a 64-word list.
//! Code format: <RAILS>-<WORD><NN>, e.g., 5-MAPLE42, 10-LANTERN07

fn fnv1a64(bytes: &[u8]) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0100_0000_01b3;
    let mut hash = FNV_OFFSET;
    for b in bytes {
        hash = (hash ^ u64::from(*b)).wrapping_mul(FNV_PRIME);
    }
    hash
}

fn sanitize_word(word: &str) -> String {
    word.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

// Word list for session codes
pub const WORD_LIST: [&str; 64] = [
    "MAPLE", "LANTERN", "RIVER", "PEBBLE", "TIGER", "PANDA", "GORILLA", "GIRAFFE", "CHICKEN",
    "BEAR", "CAT", "DOG", "COW", "PIG", "LADDER", "RUNG", "RAIL", "BRIDGE", "STAIRS", "ROPE",
    "KNOT", "COFFEE", "LUNCH", "DESSERT", "TICKET", "PRIZE", "LUCKY", "CLOVER", "DICE", "COIN",
    "SPIN", "DRAW", "TOKEN", "PATH", "TRAIL", "ORBIT", "COMET", "PLANET", "MOON", "SUNNY",
    "CLOUD", "RAIN", "SNOW", "WIND", "STORM", "AUTUMN", "SPRING", "SUMMER", "WINTER", "GARDEN",
    "FOREST", "MEADOW", "CANYON", "ISLAND", "HARBOR", "CASTLE", "TOWER", "MARKET", "PICNIC",
    "CANDY", "COOKIE", "MANGO", "PEACH", "LEMON",
];

#[inline]
fn pack(word_index: u16, nn: u8) -> u16 {
    word_index & 0x01FF | ((u16::from(nn) & 0x7F) << 9)
}

#[inline]
fn unpack(packed: u16) -> (u16, u8) {
    (packed & 0x01FF, ((packed >> 9) & 0x7F) as u8)
}

fn compose_seed(rail_count: usize, word_index: u16, nn: u8) -> u64 {
    let packed = pack(word_index, nn);
    // Domain-separated FNV input
    let mut buf = [0u8; 10];
    buf[..6].copy_from_slice(b"LADDR-");
    buf[6] = u8::try_from(rail_count).unwrap_or(u8::MAX);
    buf[7] = (packed & 0xFF) as u8;
    buf[8] = (packed >> 8) as u8;
    buf[9] = 0x5A;
    let h = fnv1a64(&buf);
    (h & 0xFFFF_FFFF_FFFF_0000) | u64::from(packed)
}

#[must_use]
pub fn encode_code(rail_count: usize, seed: u64) -> String {
    let packed = (seed & 0xFFFF) as u16;
    let (wi, mut nn) = unpack(packed);
    let word = WORD_LIST.get(wi as usize).copied().unwrap_or("MAPLE");
    if nn > 99 {
        nn %= 100;
    }
    format!("{rail_count}-{word}{nn:02}")
}

/// Decode a session code into its rail count and seed.
#[must_use]
pub fn decode_code(code: &str) -> Option<(usize, u64)> {
    let s = code.trim();
    let (rails, rest) = s.split_once('-')?;
    let rail_count: usize = rails.trim().parse().ok()?;
    if rail_count == 0 || rest.len() < 3 {
        return None;
    }
    let split = rest.len() - 2;
    let (word_part, nn_part) = (rest.get(..split)?, rest.get(split..)?);
    let nn: u8 = nn_part.parse().ok()?;
    let word = sanitize_word(word_part);
    let idx = WORD_LIST.iter().position(|w| sanitize_word(w) == word)?;
    let wi = u16::try_from(idx).ok()?;
    Some((rail_count, compose_seed(rail_count, wi, nn)))
}

/// Pick a seed that a session code can express exactly.
///
/// `decode_code(&encode_code(rail_count, seed))` yields this seed again.
#[must_use]
pub fn seed_from_entropy(rail_count: usize, entropy: u64) -> u64 {
    let wi = u16::try_from(entropy % WORD_LIST.len() as u64).unwrap_or(0);
    let nn = ((entropy >> 17) % 100) as u8;
    compose_seed(rail_count, wi, nn)
}

#[must_use]
pub fn code_from_entropy(rail_count: usize, entropy: u64) -> String {
    encode_code(rail_count, seed_from_entropy(rail_count, entropy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrips_code() {
        let code = code_from_entropy(6, 0xDEAD_BEEF_CAFE_BABE);
        let (rails, seed) = decode_code(&code).unwrap();
        assert_eq!(rails, 6);
        assert_eq!(encode_code(rails, seed), code);
    }

    #[test]
    fn entropy_seeds_survive_the_code() {
        for entropy in [0, 7, 0xFFFF, u64::MAX, 0x1234_5678_9ABC_DEF0] {
            for rails in 1..=10 {
                let seed = seed_from_entropy(rails, entropy);
                assert_eq!(
                    decode_code(&encode_code(rails, seed)),
                    Some((rails, seed)),
                    "entropy {entropy} rails {rails}"
                );
            }
        }
    }

    #[test]
    fn maple_42_stable() {
        let (rails, seed) = decode_code("5-MAPLE42").unwrap();
        assert_eq!(rails, 5);
        assert_eq!(encode_code(5, seed), "5-MAPLE42");
        assert_eq!(decode_code("5-maple42"), Some((5, seed)));
    }

    #[test]
    fn rail_count_separates_seeds() {
        let (_, five) = decode_code("5-LANTERN07").unwrap();
        let (_, six) = decode_code("6-LANTERN07").unwrap();
        assert_ne!(five, six);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(decode_code("0-MAPLE42"), None);
        assert_eq!(decode_code("MAPLE42"), None);
        assert_eq!(decode_code("4-NOTAWORD11"), None);
        assert_eq!(decode_code("4-MAPLEXX"), None);
        assert_eq!(decode_code("4-MAPLé"), None);
    }

    #[test]
    fn words_are_unique() {
        let mut words: Vec<String> = WORD_LIST.iter().map(|w| sanitize_word(w)).collect();
        words.sort();
        words.dedup();
        assert_eq!(words.len(), WORD_LIST.len());
    }
}
