use log::{info, warn};

use crate::config;
use crate::platform::{Navigator, Storage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeGateState {
    Pending,
    Confirmed,
    Exited,
}

impl AgeGateState {
    /// Reads the confirmation remembered for this browser session.
    pub fn initial<S: Storage>(session: &S) -> Self {
        match session.get(config::AGE_VERIFIED_KEY) {
            Ok(Some(value)) if value == "true" => AgeGateState::Confirmed,
            Ok(_) => AgeGateState::Pending,
            Err(e) => {
                warn!("Could not read age confirmation: {}", e);
                AgeGateState::Pending
            }
        }
    }

    pub fn blocks_content(self) -> bool {
        self != AgeGateState::Confirmed
    }
}

pub fn confirm<S: Storage>(session: &S) -> AgeGateState {
    if let Err(e) = session.set(config::AGE_VERIFIED_KEY, "true") {
        warn!("Could not remember age confirmation: {}", e);
    }
    info!("Age confirmed");
    AgeGateState::Confirmed
}

pub fn exit<N: Navigator>(navigator: &N) -> AgeGateState {
    info!("Visitor left at the age gate");
    navigator.redirect(config::EXIT_URL);
    AgeGateState::Exited
}
