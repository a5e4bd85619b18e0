use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use term_gen_core::io::read_file;
use term_gen_core::model::generator::Generator;
use term_gen_core::model::generator_config::GeneratorConfig;

/// Used when `./data/names.txt` does not exist.
const BUILTIN_NAMES: [&str; 10] = [
    "Ada Lovelace", "Alan Turing", "Grace Hopper", "Edsger Dijkstra", "Barbara Liskov",
    "Donald Knuth", "Frances Allen", "John McCarthy", "Margaret Hamilton", "Niklaus Wirth",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // One training sequence per line; blank lines are skipped by training
    let path = Path::new("./data/names.txt");
    let sources = if path.exists() {
        read_file(path)?
    } else {
        BUILTIN_NAMES.iter().map(|s| s.to_string()).collect()
    };

    // Default exponent is 1.3: frequent transitions are favored beyond
    // their empirical share
    let generator = Generator::train(&sources);
    println!("Trained on {} sequences", generator.raw().source_count());

    // Generate 10 sequences using the thread-local random source
    for (i, name) in generator.generate_list(10)?.iter().enumerate() {
        let marker = if generator.is_known(name) { " (from training data)" } else { "" };
        println!("Generated {}: {}{}", i + 1, name, marker);
    }

    // A seeded random source gives the same output every time
    let mut rng = StdRng::seed_from_u64(42);
    println!("Seeded: {}", generator.generate_list_with(3, &mut rng)?.join(", "));

    // A linear exponent reflects the empirical frequencies as-is
    let config = GeneratorConfig::with_exponent(1.0)?;
    let linear = Generator::with_config(&sources, &config);
    println!("Linear: {}", linear.generate()?);

    // An invalid exponent is rejected up front
    match GeneratorConfig::with_exponent(-1.0) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Rejected: {e}"),
    }

    // An empty model trains fine but cannot generate
    let empty = Generator::train(["", "   "]);
    match empty.generate() {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Empty model: {e}"),
    }

    Ok(())
}
