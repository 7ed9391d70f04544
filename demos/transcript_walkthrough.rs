use fs_transcript::{HashId, TranscriptConfig, TranscriptError};

fn run_round(config: &TranscriptConfig, messages: &[(&str, &[u8])]) -> Result<Vec<Vec<u8>>, TranscriptError> {
    let mut transcript = match config.build() {
        Ok(transcript) => transcript,
        Err(err) => {
            eprintln!("invalid transcript layout: {err}");
            std::process::exit(1);
        }
    };
    for (name, message) in messages {
        transcript.bind(name, message.to_vec())?;
    }
    config
        .challenges
        .iter()
        .map(|name| transcript.compute_challenge(name))
        .collect()
}

fn main() {
    let config = TranscriptConfig::new(HashId::Blake2b256, ["gamma", "beta", "alpha", "zeta"]);
    let messages: [(&str, &[u8]); 3] = [
        ("gamma", b"wire commitments"),
        ("alpha", b"permutation commitment"),
        ("zeta", b"quotient commitment"),
    ];

    let prover = run_round(&config, &messages);
    let verifier = run_round(&config, &messages);
    match (prover, verifier) {
        (Ok(prover), Ok(verifier)) if prover == verifier => {
            for (name, value) in config.challenges.iter().zip(&prover) {
                println!("{name:>6}: {}", hex::encode(value));
            }
            println!("Prover and verifier derived identical challenges.");
        }
        (Ok(_), Ok(_)) => {
            eprintln!("Prover and verifier disagree.");
            std::process::exit(1);
        }
        (Err(err), _) | (_, Err(err)) => {
            eprintln!("transcript error: {err}");
            std::process::exit(1);
        }
    }

    let mut transcript = match config.build() {
        Ok(transcript) => transcript,
        Err(err) => {
            eprintln!("invalid transcript layout: {err}");
            std::process::exit(1);
        }
    };
    match transcript.compute_challenge("beta") {
        Err(err) => println!("Out-of-order computation refused: {err}"),
        Ok(_) => {
            eprintln!("Out-of-order computation was accepted.");
            std::process::exit(1);
        }
    }
}
