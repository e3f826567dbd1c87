// src/bin/e2ee.rs
//! e2ee — key generation and password file sealing from the shell
//!
//! Usage:
//!   e2ee keygen symmetric|ecdh|rsa
//!   e2ee seal <plaintext> <envelope.json>
//!   e2ee open <envelope.json> <plaintext>
//!   e2ee hash <file>
//!   e2ee encrypt-file <key.hex> <plaintext> <ciphertext>   (header JSON on stdout)
//!   e2ee decrypt-file <key.hex> <header.json> <ciphertext> <plaintext>
//!
//! The file commands read in `[streaming] chunk_size` pieces from the config.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use e2ee_vault::{
    config, decrypt_reader, decrypt_with_password, encrypt_reader, encrypt_with_password,
    generate_ecdh_key_pair, generate_key, generate_key_pair, hash, init_logging, EncryptedData,
    StreamHeader,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "e2ee")]
#[command(about = "Envelope encryption helpers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Read the password from this environment variable instead of prompting
    #[arg(long, global = true)]
    password_env: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum KeyKind {
    /// 32 random bytes, hex
    Symmetric,
    /// secp256k1 pair, hex (JSON)
    Ecdh,
    /// RSA-4096 pair, PEM (JSON)
    Rsa,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate key material and print it to stdout
    Keygen {
        #[arg(value_enum)]
        kind: KeyKind,
    },

    /// Password-encrypt a UTF-8 file into a JSON envelope
    Seal { input: PathBuf, output: PathBuf },

    /// Decrypt a JSON envelope written by `seal`
    Open { input: PathBuf, output: PathBuf },

    /// Print the SHA-256 fingerprint of a file
    Hash { file: PathBuf },

    /// Stream-encrypt any file under a hex key file; prints the IV/tag header
    EncryptFile {
        key: PathBuf,
        input: PathBuf,
        output: PathBuf,
    },

    /// Stream-decrypt a file written by `encrypt-file`
    DecryptFile {
        key: PathBuf,
        header: PathBuf,
        input: PathBuf,
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Keygen { kind } => cmd_keygen(kind),
        Commands::Seal { input, output } => cmd_seal(&input, &output, cli.password_env.as_deref()),
        Commands::Open { input, output } => cmd_open(&input, &output, cli.password_env.as_deref()),
        Commands::Hash { file } => cmd_hash(&file),
        Commands::EncryptFile { key, input, output } => cmd_encrypt_file(&key, &input, &output),
        Commands::DecryptFile {
            key,
            header,
            input,
            output,
        } => cmd_decrypt_file(&key, &header, &input, &output),
    }
}

fn read_password(password_env: Option<&str>, confirm: bool) -> Result<String> {
    if let Some(var) = password_env {
        return std::env::var(var).with_context(|| format!("{var} is not set"));
    }

    let password = rpassword::prompt_password("Password: ")?;
    if confirm && rpassword::prompt_password("Confirm: ")? != password {
        bail!("passwords do not match");
    }
    if password.is_empty() {
        bail!("empty password");
    }
    Ok(password)
}

fn cmd_keygen(kind: KeyKind) -> Result<()> {
    match kind {
        KeyKind::Symmetric => println!("{}", generate_key()),
        KeyKind::Ecdh => println!("{}", serde_json::to_string_pretty(&generate_ecdh_key_pair())?),
        KeyKind::Rsa => {
            info!("Generating RSA-4096 pair, this takes a few seconds");
            println!("{}", serde_json::to_string_pretty(&generate_key_pair()?)?);
        }
    }
    Ok(())
}

fn cmd_seal(input: &Path, output: &Path, password_env: Option<&str>) -> Result<()> {
    let plaintext = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {} as UTF-8", input.display()))?;
    let password = read_password(password_env, true)?;

    let envelope = encrypt_with_password(&plaintext, &password)?;
    fs::write(output, serde_json::to_vec_pretty(&envelope)?)?;

    info!("Sealed {} → {}", input.display(), output.display());
    Ok(())
}

fn cmd_open(input: &Path, output: &Path, password_env: Option<&str>) -> Result<()> {
    let envelope: EncryptedData = serde_json::from_slice(&fs::read(input)?)
        .with_context(|| format!("{} is not an envelope", input.display()))?;
    let password = read_password(password_env, false)?;

    let plaintext = decrypt_with_password(&envelope, &password)
        .context("Decryption failed — wrong password or corrupted envelope")?;
    fs::write(output, plaintext)?;

    info!("Opened {} → {}", input.display(), output.display());
    Ok(())
}

fn cmd_hash(file: &Path) -> Result<()> {
    println!("{}", hash(fs::read(file)?));
    Ok(())
}

fn read_key(path: &Path) -> Result<String> {
    let key = fs::read_to_string(path)
        .with_context(|| format!("Failed to read key file {}", path.display()))?;
    Ok(key.trim().to_owned())
}

fn cmd_encrypt_file(key: &Path, input: &Path, output: &Path) -> Result<()> {
    let key = read_key(key)?;
    let chunk_size = config::load().streaming.chunk_size;

    let header = encrypt_reader(
        key.as_str(),
        fs::File::open(input)?,
        fs::File::create(output)?,
        chunk_size,
    )?;
    println!("{}", serde_json::to_string_pretty(&header)?);

    info!("Encrypted {} → {}", input.display(), output.display());
    Ok(())
}

fn cmd_decrypt_file(key: &Path, header: &Path, input: &Path, output: &Path) -> Result<()> {
    let key = read_key(key)?;
    let header: StreamHeader = serde_json::from_slice(&fs::read(header)?)
        .with_context(|| format!("{} is not a stream header", header.display()))?;
    let chunk_size = config::load().streaming.chunk_size;

    let written = decrypt_reader(
        key.as_str(),
        &header,
        fs::File::open(input)?,
        fs::File::create(output)?,
        chunk_size,
    );
    if written.is_err() {
        let _ = fs::remove_file(output);
    }
    let written = written.context("Decryption failed — wrong key or corrupted file")?;

    info!("Decrypted {} bytes → {}", written, output.display());
    Ok(())
}
