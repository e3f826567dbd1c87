// src/aliases.rs
//! secure-gate secret types used throughout e2ee-vault
//!
//! Everything here zeroizes on drop.

use secure_gate::fixed_alias;

// Fixed-size secrets
fixed_alias!(SymmetricKey32, 32); // AES-256-GCM key, raw or PBKDF2-derived
fixed_alias!(SharedSecret32, 32); // raw secp256k1 ECDH x-coordinate, never used as a key directly
