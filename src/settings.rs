//! Run settings
//!
//! Loaded from JSON (all fields optional) and validated before a
//! `GameState` is built, so bad configuration fails fast.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::sim::stat::{Operator, StatKind};

/// Which game the simulation runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Horizontal runner, gates change a head count; game over at zero
    #[default]
    GateCount,
    /// Horizontal runner, gates change a power level that never drops below 1
    GatePower,
    /// Vertical mover fighting enemy waves with swords and arrows
    Combat,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::GateCount => "gate_count",
            Variant::GatePower => "gate_power",
            Variant::Combat => "combat",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "gate_count" | "count" | "military" => Some(Variant::GateCount),
            "gate_power" | "power" | "arrow" => Some(Variant::GatePower),
            "combat" | "arena" => Some(Variant::Combat),
            _ => None,
        }
    }

    /// Stat tracked by gate variants
    pub fn stat_kind(&self) -> Option<StatKind> {
        match self {
            Variant::GateCount => Some(StatKind::Count),
            Variant::GatePower => Some(StatKind::Power),
            Variant::Combat => None,
        }
    }

    /// Default field size (width, height)
    pub fn default_field(&self) -> (f32, f32) {
        match self {
            Variant::GateCount | Variant::GatePower => (LANE_FIELD_WIDTH, LANE_FIELD_HEIGHT),
            Variant::Combat => (ARENA_FIELD_WIDTH, ARENA_FIELD_HEIGHT),
        }
    }
}

/// Settings for a single run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed (same seed and inputs give the same run)
    pub seed: u64,
    pub variant: Variant,

    // === Field ===
    /// Field width override (variant default when absent)
    pub field_width: Option<f32>,
    /// Field height override (variant default when absent)
    pub field_height: Option<f32>,

    // === Spawn intervals (ms) ===
    pub gate_interval_ms: f32,
    pub wall_interval_ms: f32,
    pub enemy_interval_ms: f32,
    pub sword_interval_ms: f32,
    pub arrow_interval_ms: f32,
    pub bolt_interval_ms: f32,

    // === Starting stats ===
    pub initial_count: u64,
    pub initial_power: u64,
    pub initial_hp: u32,

    // === Gate rolls ===
    /// One symbol per weight unit, e.g. `"+++--x/"`
    pub operator_pool: String,
    /// Inclusive operand range for `+` and `-`
    pub additive_operands: (u64, u64),
    /// Inclusive operand range for `x` and `/`
    pub scaling_operands: (u64, u64),
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,
            variant: Variant::GateCount,

            field_width: None,
            field_height: None,

            gate_interval_ms: GATE_INTERVAL_MS,
            wall_interval_ms: WALL_INTERVAL_MS,
            enemy_interval_ms: ENEMY_INTERVAL_MS,
            sword_interval_ms: SWORD_INTERVAL_MS,
            arrow_interval_ms: ARROW_INTERVAL_MS,
            bolt_interval_ms: BOLT_INTERVAL_MS,

            initial_count: 1,
            initial_power: 1,
            initial_hp: ARENA_START_HP,

            operator_pool: OPERATOR_POOL.to_string(),
            additive_operands: ADDITIVE_OPERANDS,
            scaling_operands: SCALING_OPERANDS,
        }
    }
}

impl Settings {
    /// Defaults for a variant
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Same settings with a different seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Effective field size (width, height)
    pub fn field_size(&self) -> (f32, f32) {
        let (w, h) = self.variant.default_field();
        (self.field_width.unwrap_or(w), self.field_height.unwrap_or(h))
    }

    /// Parse the weighted operator pool
    pub fn operators(&self) -> Result<Vec<Operator>, SettingsError> {
        let ops = self
            .operator_pool
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(Operator::from_symbol)
            .collect::<Result<Vec<_>, _>>()?;
        if ops.is_empty() {
            return Err(SettingsError::EmptyOperatorPool);
        }
        Ok(ops)
    }

    /// Check every field; the first problem found is returned
    pub fn validate(&self) -> Result<(), SettingsError> {
        let (width, height) = self.field_size();
        if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
            return Err(SettingsError::InvalidField { width, height });
        }

        let intervals = [
            ("gate_interval_ms", self.gate_interval_ms),
            ("wall_interval_ms", self.wall_interval_ms),
            ("enemy_interval_ms", self.enemy_interval_ms),
            ("sword_interval_ms", self.sword_interval_ms),
            ("arrow_interval_ms", self.arrow_interval_ms),
            ("bolt_interval_ms", self.bolt_interval_ms),
        ];
        for (name, value) in intervals {
            if !(value > 0.0) || !value.is_finite() {
                return Err(SettingsError::NonPositiveInterval { name, value });
            }
        }

        self.operators()?;

        let (min, max) = self.additive_operands;
        if min > max {
            return Err(SettingsError::InvalidRange {
                name: "additive_operands",
                min,
                max,
            });
        }
        // Zero would divide by zero
        let (min, max) = self.scaling_operands;
        if min == 0 || min > max {
            return Err(SettingsError::InvalidRange {
                name: "scaling_operands",
                min,
                max,
            });
        }

        if self.initial_power == 0 {
            return Err(SettingsError::InvalidRange {
                name: "initial_power",
                min: 1,
                max: 0,
            });
        }

        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!(
            "Loaded settings: variant={}, seed={}",
            settings.variant.as_str(),
            settings.seed
        );
        Ok(settings)
    }

    /// Read, parse and validate a JSON settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| SettingsError::Io {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;
        Self::from_json(&json)
    }
}
