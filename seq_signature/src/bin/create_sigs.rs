extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate rayon;
extern crate seq_signature;
extern crate sig_io;
use clap::{App, Arg, ArgMatches};
use seq_signature::{Config, IndexMode, InvalidPolicy, Signer};
use std::path::PathBuf;

fn parse_usize(matches: &ArgMatches, name: &str) -> std::io::Result<Option<usize>> {
    match matches.value_of(name) {
        Some(value) => value.parse().map(Some).map_err(|why| {
            let message = format!("--{}: {} ({})", name, why, value);
            std::io::Error::new(std::io::ErrorKind::InvalidInput, message)
        }),
        None => Ok(None),
    }
}

fn main() -> std::io::Result<()> {
    let matches = App::new("create_sigs")
        .version("0.1")
        .author("Bansho Masutani")
        .about("Random indexing signatures of protein sequences.")
        .arg(
            Arg::with_name("input")
                .required(true)
                .value_name("INPUT")
                .help("Records of a metadata line followed by a sequence line")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("CONFIG")
                .help("Parameters in JSON. Flags below override them.")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("word_len")
                .short("w")
                .long("word_len")
                .value_name("WORDLEN")
                .help("Length of a term [default: 3]")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("partition_size")
                .short("p")
                .long("partition_size")
                .value_name("PARTITION_SIZE")
                .help("Length of a window. Windows overlap by half [default: 16]")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("signature_len")
                .short("l")
                .long("signature_len")
                .value_name("SIGNATURE_LEN")
                .help("Bits in a signature, a multiple of 8 [default: 64]")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("density")
                .short("d")
                .long("density")
                .value_name("DENSITY")
                .help("Percentage of non-zero entries in term vectors [default: 21]")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("threads")
                .short("t")
                .long("threads")
                .required(false)
                .value_name("THREADS")
                .help("Number of Threads")
                .default_value(&"1")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("batch")
                .short("b")
                .long("batch")
                .required(false)
                .value_name("BATCH")
                .help("Number of sequences signed in parallel at once")
                .default_value(&"1024")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("OUTPUT")
                .help("Output file [default: INPUT.partP_sigsWW_L]")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("per_window_index")
                .long("per_window_index")
                .help("Number records by window instead of by sequence."),
        )
        .arg(
            Arg::with_name("skip_invalid")
                .long("skip_invalid")
                .help("Skip sequences with symbols outside the 20 amino acids, instead of aborting."),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Output debug to the standard error."),
        )
        .get_matches();
    let level = match matches.occurrences_of("verbose") {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    let start = std::time::Instant::now();
    let mut config = match matches.value_of("config") {
        Some(file) => Config::from_json_file(file)?,
        None => Config::default(),
    };
    if let Some(x) = parse_usize(&matches, "word_len")? {
        config.word_len = x;
    }
    if let Some(x) = parse_usize(&matches, "partition_size")? {
        config.partition_size = x;
    }
    if let Some(x) = parse_usize(&matches, "signature_len")? {
        config.signature_len = x;
    }
    if let Some(x) = parse_usize(&matches, "density")? {
        config.density = x;
    }
    if matches.is_present("per_window_index") {
        config.index_mode = IndexMode::PerWindow;
    }
    let policy = if matches.is_present("skip_invalid") {
        InvalidPolicy::Skip
    } else {
        InvalidPolicy::Abort
    };
    let threads = parse_usize(&matches, "threads")?.unwrap_or(1);
    let batch = parse_usize(&matches, "batch")?.unwrap_or(1024);
    if let Err(why) = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
    {
        debug!("{:?} Global pool is already initialized.", why);
    }
    debug!("{:?}", config);
    let signer = Signer::new(config)?;
    let config = signer.config();
    // The only required argument.
    let input = matches.value_of("input").unwrap();
    let output = match matches.value_of("output") {
        Some(output) => PathBuf::from(output),
        None => sig_io::signature_file_name(
            input,
            config.partition_size,
            config.word_len,
            config.signature_len,
        ),
    };
    info!("Signing {} into {}", input, output.display());
    let reader = sig_io::fasta::Reader::from_file(input)?;
    let mut writer = sig_io::sigfile::Writer::to_file(&output, config.signature_len)?;
    let summary = seq_signature::sign_records(&signer, reader, &mut writer, batch, policy)?;
    writer.finish()?;
    info!(
        "{} sequences ({} skipped), {} records",
        summary.sequences, summary.skipped, summary.records
    );
    info!(
        "{} distinct terms, {} built",
        signer.cache().len(),
        signer.cache().computed()
    );
    println!("{} {} seconds", input, start.elapsed().as_secs_f64());
    Ok(())
}
