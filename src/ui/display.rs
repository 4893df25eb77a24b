//! Formatting of session state for the terminal.

use alloy::primitives::Address;

use crate::blockchain::NetworkFamily;
use crate::session::Session;

/// `0x1234…abcd`: first six and last four characters of the checksummed address.
pub fn truncate_account(account: &Address) -> String {
    let full = account.to_checksum(None);
    let head = full.get(..6).unwrap_or(&full);
    let tail = full.get(full.len().saturating_sub(4)..).unwrap_or("");
    format!("{}...{}", head, tail)
}

/// Network label prefixed with its family logo.
pub fn network_line(session: &Session) -> String {
    let logo = session
        .active_chain_id()
        .map(NetworkFamily::of)
        .unwrap_or(NetworkFamily::Other)
        .logo();
    format!("{} {}", logo, session.active_chain_label())
}

/// One-line summary of the session, as shown in the header.
pub fn status_line(session: &Session) -> String {
    match session.active_account() {
        Some(account) => format!("{} | Wallet: {}", network_line(session), truncate_account(account)),
        None => format!("{} | Not connected", network_line(session)),
    }
}

/// Name with its top-level domain, e.g. `abc.fresh`.
pub fn full_name(name: &str, tld: &str) -> String {
    format!("{}.{}", name, tld.trim_start_matches('.'))
}
