mod passphrase;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use threecrypt_core::{decrypt, dump, encrypt, interrupt, EngineError};
use threecrypt_crypto::CostParameters;

const ENCRYPTED_SUFFIX: &str = ".3c";

/// Encrypt and decrypt files with Threefish-512/Skein-512.
#[derive(Parser)]
#[command(name = "3crypt", version, about)]
struct Args {
	/// Encrypt the input file.
	#[arg(short = 'e', long, conflicts_with_all = ["decrypt", "dump"])]
	encrypt: bool,

	/// Decrypt the input file.
	#[arg(short = 'd', long, conflicts_with_all = ["encrypt", "dump"])]
	decrypt: bool,

	/// Print the input file's container header and exit.
	#[arg(short = 'D', long, conflicts_with_all = ["encrypt", "decrypt"])]
	dump: bool,

	/// Input file.
	#[arg(short = 'i', long)]
	input: PathBuf,

	/// Output file.
	#[arg(short = 'o', long)]
	output: Option<PathBuf>,

	/// SSPKDF iteration count (encrypt only).
	#[arg(long, default_value_t = CostParameters::DEFAULT.num_iter)]
	num_iter: u32,

	/// SSPKDF concatenation count (encrypt only).
	#[arg(long, default_value_t = CostParameters::DEFAULT.num_concat)]
	num_concat: u32,

	/// Prompt for supplementary entropy to mix into the CSPRNG before
	/// generating the salt, tweak, and CBC IV (encrypt only).
	#[arg(short = 'E', long)]
	entropy: bool,
}

fn main() -> ExitCode {
	env_logger::init();

	let args = Args::parse();

	install_interrupt_handler();

	match run(&args) {
		Ok(()) => ExitCode::SUCCESS,
		Err(error) => {
			eprintln!("3crypt: {error}");
			ExitCode::FAILURE
		}
	}
}

fn run(args: &Args) -> Result<(), EngineError> {
	if args.dump {
		return run_dump(&args.input);
	}
	if args.encrypt {
		return run_encrypt(args);
	}
	if args.decrypt {
		return run_decrypt(args);
	}

	eprintln!("one of --encrypt, --decrypt, or --dump is required");
	Err(EngineError::InputMissing)
}

fn run_encrypt(args: &Args) -> Result<(), EngineError> {
	let output = args.output.clone().unwrap_or_else(|| default_encrypt_output(&args.input));
	let cost = CostParameters { num_iter: args.num_iter, num_concat: args.num_concat };
	cost.validate().map_err(|_| EngineError::Crypto(threecrypt_crypto::CryptoError::InvalidHeader))?;

	let passphrase = passphrase::read_confirmed("Enter passphrase: ", "Confirm passphrase: ")?;

	let extra_entropy = if args.entropy { passphrase::read_entropy("Enter supplementary entropy: ")? } else { Vec::new() };

	encrypt(&args.input, &output, passphrase, cost, &extra_entropy, None)?;
	log::info!("wrote {}", output.display());
	Ok(())
}

fn run_decrypt(args: &Args) -> Result<(), EngineError> {
	let output = match &args.output {
		Some(path) => path.clone(),
		None => default_decrypt_output(&args.input)?,
	};

	let passphrase = passphrase::read_once("Enter passphrase: ")?;
	decrypt(&args.input, &output, passphrase)?;
	log::info!("wrote {}", output.display());
	Ok(())
}

fn run_dump(input: &Path) -> Result<(), EngineError> {
	let stdout = std::io::stdout();
	let mut handle = stdout.lock();
	dump(input, &mut handle)
}

fn default_encrypt_output(input: &Path) -> PathBuf {
	let mut name = input.as_os_str().to_owned();
	name.push(ENCRYPTED_SUFFIX);
	PathBuf::from(name)
}

fn default_decrypt_output(input: &Path) -> Result<PathBuf, EngineError> {
	let name = input.to_string_lossy();
	match name.strip_suffix(ENCRYPTED_SUFFIX) {
		Some(stripped) => Ok(PathBuf::from(stripped)),
		None => {
			eprintln!("input does not end in {ENCRYPTED_SUFFIX}; pass --output explicitly");
			Err(EngineError::InputMissing)
		}
	}
}

fn install_interrupt_handler() {
	let _ = ctrlc::set_handler(|| {
		interrupt::request_stop();
	});
}
