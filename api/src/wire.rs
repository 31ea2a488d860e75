/// Raw JSON shapes of the two static documents — serde types only.
/// These map to the clean domain types in client.rs.
use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// Stats document: a flat array of upper-case keyed records
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawStatRecord {
    #[serde(rename = "NAME", default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "TEAM", default, deserialize_with = "lenient_string")]
    pub team: String,
    #[serde(rename = "POS", default, deserialize_with = "lenient_string")]
    pub position: String,
    #[serde(rename = "GP", default, deserialize_with = "lenient_number")]
    pub games_played: Option<f64>,
    #[serde(rename = "MIN", default, deserialize_with = "lenient_number")]
    pub minutes: Option<f64>,
    #[serde(rename = "PTS", default, deserialize_with = "lenient_number")]
    pub points: Option<f64>,
    #[serde(rename = "REB", default, deserialize_with = "lenient_number")]
    pub rebounds: Option<f64>,
    #[serde(rename = "AST", default, deserialize_with = "lenient_number")]
    pub assists: Option<f64>,
    #[serde(rename = "STL", default, deserialize_with = "lenient_number")]
    pub steals: Option<f64>,
    #[serde(rename = "BLK", default, deserialize_with = "lenient_number")]
    pub blocks: Option<f64>,
    #[serde(rename = "TO", default, deserialize_with = "lenient_number")]
    pub turnovers: Option<f64>,
    #[serde(rename = "UPDATED_AT", default, deserialize_with = "lenient_string")]
    pub updated_at: String,
}

// ---------------------------------------------------------------------------
// Roster document: a bare array, or an object wrapping one under "players"
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum RosterDocument {
    List(Vec<RawRosterRecord>),
    Wrapped {
        #[serde(default)]
        players: Vec<RawRosterRecord>,
    },
}

impl RosterDocument {
    pub fn into_records(self) -> Vec<RawRosterRecord> {
        match self {
            RosterDocument::List(records) => records,
            RosterDocument::Wrapped { players } => players,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawRosterRecord {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub player_id: Option<String>,
    #[serde(rename = "firstName", default, deserialize_with = "lenient_text")]
    pub first_name_camel: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default, deserialize_with = "lenient_text")]
    pub last_name_camel: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub headshot_url: Option<String>,
}

/// Player ids show up as integers, integral floats (`2544.0`) or strings.
/// Zero, fractions, blanks and other shapes count as no id, so one odd
/// record never rejects the whole roster.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => {
            if let Some(id) = n.as_i64() {
                Some(id).filter(|id| *id != 0).map(|id| id.to_string())
            } else if let Some(id) = n.as_u64() {
                Some(id.to_string())
            } else {
                n.as_f64()
                    .filter(|v| v.is_finite() && v.fract() == 0.0 && *v != 0.0)
                    .map(|v| format!("{v:.0}"))
            }
        }
        serde_json::Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        _ => None,
    })
}

/// Optional text field; blanks and non-strings are missing.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s).filter(|s| !s.trim().is_empty()),
        _ => None,
    })
}

/// Stat cells may be numbers, numeric strings, or null. Anything else is
/// treated as missing rather than failing the whole document.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}
