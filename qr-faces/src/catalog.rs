use crate::crypto::Digest;

// Static name table for derived faces. Kept separate so it can grow without touching the
// derivation code. Appending names reshuffles every existing code, so treat it as frozen.

pub static NAMES: &[&str] = &[
    "Ada", "Alfie", "Amara", "Archie", "Astrid", "Basil", "Bea", "Benny",
    "Bianca", "Biscuit", "Blossom", "Boris", "Bubbles", "Caspar", "Cleo", "Clover",
    "Cosmo", "Daisy", "Dante", "Dexter", "Dot", "Dudley", "Edna", "Elio",
    "Elsie", "Enzo", "Fern", "Fig", "Finn", "Flora", "Frankie", "Gus",
    "Hazel", "Hugo", "Ida", "Igor", "Iris", "Ivy", "Jasper", "Juno",
    "Kiki", "Kit", "Lola", "Louie", "Luna", "Mabel", "Mango", "Margo",
    "Milo", "Mochi", "Momo", "Nico", "Nina", "Noodle", "Olive", "Otto",
    "Pablo", "Peach", "Pepper", "Pickle", "Pip", "Poppy", "Quincy", "Remy",
    "Rocco", "Rosie", "Rufus", "Sage", "Sasha", "Scout", "Sprout", "Sunny",
    "Tater", "Theo", "Tilly", "Toby", "Tofu", "Uma", "Vera", "Vinnie",
    "Waffles", "Wally", "Willa", "Winnie", "Xena", "Yara", "Yogi", "Yuki",
    "Zara", "Ziggy", "Zola", "Zuzu", "Bramble", "Nugget", "Pixel", "Wobble",
];

/// Index into [`NAMES`] taken from the first two digest bytes, big-endian.
pub fn name_index(digest: &Digest) -> usize {
    let bytes = digest.as_bytes();
    (bytes[0] as usize * 256 + bytes[1] as usize) % NAMES.len()
}

pub fn name_from_digest(digest: &Digest) -> &'static str {
    NAMES[name_index(digest)]
}
