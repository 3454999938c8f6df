// ⚙️ Startup Configuration - credentials, endpoint and demo query inputs
//
// Required before any request is attempted: an API key and the service base
// URL, from named arguments or environment variables. The demonstration
// filter sets (lot ids, financial community ids, vendor id) are inputs too;
// the built-in samples below are defaults, not part of the contract.

use anyhow::{anyhow, bail, Context, Result};
use std::env;

// ============================================================================
// SAMPLE INPUTS
// ============================================================================

/// Demo lot set used when `--lot-ids` is not supplied.
pub const SAMPLE_LOT_IDS: &[i64] = &[
    332996, 332998, 332999, 333000, 333001, 332981, 332982, 332986, 332987, 332990, 332991,
    332992, 332994, 333032, 333037, 333049, 333050, 333051, 333052, 333053, 332910, 332911,
    332912, 332913, 332914, 332915, 332930, 332932, 332933, 333002, 333003, 333004, 333013,
    333014, 333015, 332964, 332965, 332966, 332970, 332979, 333006, 333008, 332908, 332909,
    333030, 333059, 332898, 332899, 332900, 332901, 332902, 333018, 333019, 333020, 333021,
    333022, 332959, 332960, 332961, 332973, 332974, 332975, 332976, 332977, 332978, 333038,
    333056, 333039, 333057, 333040, 333058, 333041, 333042, 333043, 333044, 333045, 333046,
    333060, 333061, 333062, 333063, 333064, 333065, 333066, 332903, 332904, 332905, 332906,
    332907,
];

/// Demo financial community set used when `--financial-community-ids` is not
/// supplied.
pub const SAMPLE_FINANCIAL_COMMUNITY_IDS: &[i64] = &[6772, 6773, 6774];

/// Demo vendor used when `--vendor-id` is not supplied.
pub const SAMPLE_VENDOR_ID: i64 = 2964;

// ============================================================================
// CONFIG
// ============================================================================

/// Query inputs shared by both strategies.
#[derive(Debug, Clone)]
pub struct QueryParams {
    pub lot_ids: Vec<i64>,
    pub financial_community_ids: Vec<i64>,
    pub vendor_id: i64,
}

impl Default for QueryParams {
    fn default() -> Self {
        QueryParams {
            lot_ids: SAMPLE_LOT_IDS.to_vec(),
            financial_community_ids: SAMPLE_FINANCIAL_COMMUNITY_IDS.to_vec(),
            vendor_id: SAMPLE_VENDOR_ID,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base_url: String,
    pub params: QueryParams,
    /// Print the stitched result set as JSON after the report.
    pub dump: bool,
}

impl Config {
    /// Load from the process arguments with environment fallback.
    pub fn load() -> Result<Self> {
        let args: Vec<String> = env::args().skip(1).collect();
        Config::from_parts(&args, |key| env::var(key).ok())
    }

    /// Build from explicit sources.
    ///
    /// Recognized arguments: `--api-key`, `--api-base-url`, `--lot-ids`,
    /// `--financial-community-ids`, `--vendor-id` (each taking a value) and
    /// `--dump`. `--api-key` and `--api-base-url` fall back to the `API_KEY`
    /// and `API_BASE_URL` environment variables and are required.
    pub fn from_parts(args: &[String], env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut api_key = None;
        let mut api_base_url = None;
        let mut params = QueryParams::default();
        let mut dump = false;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let mut value = |flag: &str| {
                iter.next()
                    .cloned()
                    .ok_or_else(|| anyhow!("Missing value for {}", flag))
            };
            match arg.as_str() {
                "--api-key" => api_key = Some(value("--api-key")?),
                "--api-base-url" => api_base_url = Some(value("--api-base-url")?),
                "--lot-ids" => params.lot_ids = parse_id_list(&value("--lot-ids")?)?,
                "--financial-community-ids" => {
                    params.financial_community_ids =
                        parse_id_list(&value("--financial-community-ids")?)?;
                }
                "--vendor-id" => {
                    let raw = value("--vendor-id")?;
                    params.vendor_id = raw
                        .parse()
                        .with_context(|| format!("Invalid vendor id '{}'", raw))?;
                }
                "--dump" => dump = true,
                other => bail!("Unrecognized argument '{}'", other),
            }
        }

        let api_key = api_key.or_else(|| env("API_KEY"));
        let api_base_url = api_base_url.or_else(|| env("API_BASE_URL"));

        match (api_key, api_base_url) {
            (Some(api_key), Some(api_base_url)) => Ok(Config {
                api_key,
                api_base_url,
                params,
                dump,
            }),
            _ => bail!(
                "Required arguments or environment variables missing: \
                 '--api-key' (API_KEY) and '--api-base-url' (API_BASE_URL) must be supplied"
            ),
        }
    }
}

/// Parse a comma-separated id list.
fn parse_id_list(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<i64>()
                .with_context(|| format!("Invalid id '{}' in list '{}'", part.trim(), raw))
        })
        .collect()
}
