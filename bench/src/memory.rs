use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use succinct_trie::{Serializable, TrieBuilder};

const SEED_WORDS: u64 = 113;
const NUM_WORDS: &[usize] = &[1 << 8, 1 << 12, 1 << 16];

fn main() {
    for &nwords in NUM_WORDS {
        show_memories(nwords);
    }
}

fn gen_random_words(len: usize, seed: u64) -> Vec<String> {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            let n = rng.gen_range(1..=10);
            (0..n).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
        })
        .collect()
}

fn show_memories(nwords: usize) {
    let mut words = gen_random_words(nwords, SEED_WORDS);
    words.sort();
    println!("[nwords = {}]", nwords);

    let mut builder = TrieBuilder::default();
    builder.insert_all(&words);
    let nnodes = builder.num_nodes();
    let data = builder.to_artifact().unwrap();

    print_memory("trieData", data.trie_data.len(), nnodes);
    print_memory("directoryData", data.directory_data.len(), nnodes);
    print_memory("TrieData(binary)", data.size_in_bytes(), nnodes);
}

fn print_memory(name: &str, bytes: usize, nnodes: usize) {
    println!(
        "{}: {:.3} bits per node",
        name,
        (bytes * 8) as f64 / nnodes as f64
    );
}
