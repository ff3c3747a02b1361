//! Stock screener tool — returns mock market data.
//!
//! In production this would query a real market data API (Yahoo Finance
//! screeners, etc.). The stub returns plausible, deterministic rows so the
//! agent loop can be exercised end-to-end without network access. The six
//! screeners mirror Yahoo's predefined screener keys.

use async_trait::async_trait;
use tickerchat_core::error::ToolError;
use tickerchat_core::tool::{Tool, ToolResult};
use tracing::debug;

const MIN_LIMIT: u64 = 1;
const MAX_LIMIT: u64 = 25;
const DEFAULT_LIMIT: u64 = 5;

pub struct SimpleScreenerTool;

/// The predefined screeners this tool supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenerKind {
    DayGainers,
    DayLosers,
    MostActives,
    GrowthTechnologyStocks,
    UndervaluedLargeCaps,
    SmallCapGainers,
}

impl ScreenerKind {
    pub const ALL: [ScreenerKind; 6] = [
        ScreenerKind::DayGainers,
        ScreenerKind::DayLosers,
        ScreenerKind::MostActives,
        ScreenerKind::GrowthTechnologyStocks,
        ScreenerKind::UndervaluedLargeCaps,
        ScreenerKind::SmallCapGainers,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ScreenerKind::DayGainers => "day_gainers",
            ScreenerKind::DayLosers => "day_losers",
            ScreenerKind::MostActives => "most_actives",
            ScreenerKind::GrowthTechnologyStocks => "growth_technology_stocks",
            ScreenerKind::UndervaluedLargeCaps => "undervalued_large_caps",
            ScreenerKind::SmallCapGainers => "small_cap_gainers",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ScreenerKind::DayGainers => "Day Gainers",
            ScreenerKind::DayLosers => "Day Losers",
            ScreenerKind::MostActives => "Most Active",
            ScreenerKind::GrowthTechnologyStocks => "Tech Growth",
            ScreenerKind::UndervaluedLargeCaps => "Undervalued Large Caps",
            ScreenerKind::SmallCapGainers => "Small Cap Gainers",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.key() == key)
    }
}

#[async_trait]
impl Tool for SimpleScreenerTool {
    fn name(&self) -> &str {
        "simple_screener"
    }

    fn description(&self) -> &str {
        "Screen the stock market using a predefined screener. Returns the top matching stocks with price, daily change, volume, and market cap."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "screener": {
                    "type": "string",
                    "enum": [
                        "day_gainers",
                        "day_losers",
                        "most_actives",
                        "growth_technology_stocks",
                        "undervalued_large_caps",
                        "small_cap_gainers"
                    ],
                    "description": "Which predefined screener to run"
                },
                "limit": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 25,
                    "description": "How many stocks to return (default: 5)"
                }
            },
            "required": ["screener"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let key = arguments["screener"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'screener' argument".into()))?;

        let kind = ScreenerKind::parse(key).ok_or_else(|| {
            ToolError::InvalidArguments(format!(
                "Unknown screener '{key}'. Valid screeners: {}",
                ScreenerKind::ALL
                    .iter()
                    .map(|k| k.key())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })?;

        let limit = match arguments.get("limit") {
            None | Some(serde_json::Value::Null) => DEFAULT_LIMIT,
            Some(v) => {
                let n = v.as_u64().ok_or_else(|| {
                    ToolError::InvalidArguments("'limit' must be an integer".into())
                })?;
                if !(MIN_LIMIT..=MAX_LIMIT).contains(&n) {
                    return Err(ToolError::InvalidArguments(format!(
                        "'limit' must be between {MIN_LIMIT} and {MAX_LIMIT}, got {n}"
                    )));
                }
                n
            }
        };

        debug!(screener = key, limit, "Running stock screener");
        let rows = screen(kind, limit as usize);
        let output = render_table(kind, &rows);

        Ok(ToolResult {
            call_id: String::new(),
            success: true,
            output,
        })
    }
}

struct ScreenerRow {
    symbol: String,
    name: String,
    price: f64,
    change_pct: f64,
    volume: u64,
    market_cap: u64,
}

/// The mock universe each screener draws from. Symbols are real tickers so
/// the model's summaries read naturally.
fn universe(kind: ScreenerKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        ScreenerKind::DayGainers => &[
            ("SMCI", "Super Micro Computer, Inc."),
            ("PLTR", "Palantir Technologies Inc."),
            ("COIN", "Coinbase Global, Inc."),
            ("MARA", "Marathon Digital Holdings, Inc."),
            ("AFRM", "Affirm Holdings, Inc."),
            ("RBLX", "Roblox Corporation"),
            ("DKNG", "DraftKings Inc."),
            ("CVNA", "Carvana Co."),
            ("UPST", "Upstart Holdings, Inc."),
            ("SOFI", "SoFi Technologies, Inc."),
            ("HOOD", "Robinhood Markets, Inc."),
            ("RIVN", "Rivian Automotive, Inc."),
            ("IONQ", "IonQ, Inc."),
            ("CELH", "Celsius Holdings, Inc."),
            ("DUOL", "Duolingo, Inc."),
            ("APP", "AppLovin Corporation"),
            ("MSTR", "MicroStrategy Incorporated"),
            ("SHOP", "Shopify Inc."),
            ("NET", "Cloudflare, Inc."),
            ("CRWD", "CrowdStrike Holdings, Inc."),
            ("DDOG", "Datadog, Inc."),
            ("SNOW", "Snowflake Inc."),
            ("ZS", "Zscaler, Inc."),
            ("TTD", "The Trade Desk, Inc."),
            ("ROKU", "Roku, Inc."),
        ],
        ScreenerKind::DayLosers => &[
            ("LCID", "Lucid Group, Inc."),
            ("PTON", "Peloton Interactive, Inc."),
            ("W", "Wayfair Inc."),
            ("CHWY", "Chewy, Inc."),
            ("ETSY", "Etsy, Inc."),
            ("BYND", "Beyond Meat, Inc."),
            ("FSLY", "Fastly, Inc."),
            ("ZM", "Zoom Video Communications, Inc."),
            ("DOCU", "DocuSign, Inc."),
            ("TDOC", "Teladoc Health, Inc."),
            ("PINS", "Pinterest, Inc."),
            ("SNAP", "Snap Inc."),
            ("LYFT", "Lyft, Inc."),
            ("OPEN", "Opendoor Technologies Inc."),
            ("WISH", "ContextLogic Inc."),
            ("RDFN", "Redfin Corporation"),
            ("PLUG", "Plug Power Inc."),
            ("FUBO", "fuboTV Inc."),
            ("BB", "BlackBerry Limited"),
            ("NKLA", "Nikola Corporation"),
            ("GPRO", "GoPro, Inc."),
            ("CLOV", "Clover Health Investments"),
            ("VRM", "Vroom, Inc."),
            ("SDC", "SmileDirectClub, Inc."),
            ("ROOT", "Root, Inc."),
        ],
        ScreenerKind::MostActives => &[
            ("TSLA", "Tesla, Inc."),
            ("NVDA", "NVIDIA Corporation"),
            ("AAPL", "Apple Inc."),
            ("AMD", "Advanced Micro Devices, Inc."),
            ("AMZN", "Amazon.com, Inc."),
            ("F", "Ford Motor Company"),
            ("INTC", "Intel Corporation"),
            ("BAC", "Bank of America Corporation"),
            ("NIO", "NIO Inc."),
            ("PFE", "Pfizer Inc."),
            ("T", "AT&T Inc."),
            ("MSFT", "Microsoft Corporation"),
            ("GOOGL", "Alphabet Inc."),
            ("META", "Meta Platforms, Inc."),
            ("CCL", "Carnival Corporation"),
            ("AAL", "American Airlines Group Inc."),
            ("UBER", "Uber Technologies, Inc."),
            ("VZ", "Verizon Communications Inc."),
            ("XOM", "Exxon Mobil Corporation"),
            ("KO", "The Coca-Cola Company"),
            ("WFC", "Wells Fargo & Company"),
            ("C", "Citigroup Inc."),
            ("GM", "General Motors Company"),
            ("DIS", "The Walt Disney Company"),
            ("PYPL", "PayPal Holdings, Inc."),
        ],
        ScreenerKind::GrowthTechnologyStocks => &[
            ("NVDA", "NVIDIA Corporation"),
            ("AVGO", "Broadcom Inc."),
            ("CRM", "Salesforce, Inc."),
            ("NOW", "ServiceNow, Inc."),
            ("PANW", "Palo Alto Networks, Inc."),
            ("ANET", "Arista Networks, Inc."),
            ("SNPS", "Synopsys, Inc."),
            ("CDNS", "Cadence Design Systems, Inc."),
            ("ADBE", "Adobe Inc."),
            ("FTNT", "Fortinet, Inc."),
            ("WDAY", "Workday, Inc."),
            ("TEAM", "Atlassian Corporation"),
            ("HUBS", "HubSpot, Inc."),
            ("MDB", "MongoDB, Inc."),
            ("VEEV", "Veeva Systems Inc."),
            ("OKTA", "Okta, Inc."),
            ("TWLO", "Twilio Inc."),
            ("ESTC", "Elastic N.V."),
            ("GTLB", "GitLab Inc."),
            ("S", "SentinelOne, Inc."),
            ("PATH", "UiPath Inc."),
            ("CFLT", "Confluent, Inc."),
            ("DT", "Dynatrace, Inc."),
            ("BILL", "BILL Holdings, Inc."),
            ("SMAR", "Smartsheet Inc."),
        ],
        ScreenerKind::UndervaluedLargeCaps => &[
            ("INTC", "Intel Corporation"),
            ("VZ", "Verizon Communications Inc."),
            ("CVS", "CVS Health Corporation"),
            ("PFE", "Pfizer Inc."),
            ("BMY", "Bristol-Myers Squibb Company"),
            ("CMCSA", "Comcast Corporation"),
            ("GM", "General Motors Company"),
            ("F", "Ford Motor Company"),
            ("WBD", "Warner Bros. Discovery, Inc."),
            ("KHC", "The Kraft Heinz Company"),
            ("MO", "Altria Group, Inc."),
            ("DVN", "Devon Energy Corporation"),
            ("C", "Citigroup Inc."),
            ("USB", "U.S. Bancorp"),
            ("D", "Dominion Energy, Inc."),
            ("DOW", "Dow Inc."),
            ("KMI", "Kinder Morgan, Inc."),
            ("VTRS", "Viatris Inc."),
            ("PARA", "Paramount Global"),
            ("T", "AT&T Inc."),
            ("WBA", "Walgreens Boots Alliance, Inc."),
            ("LYB", "LyondellBasell Industries N.V."),
            ("NEM", "Newmont Corporation"),
            ("FITB", "Fifth Third Bancorp"),
            ("HBAN", "Huntington Bancshares Incorporated"),
        ],
        ScreenerKind::SmallCapGainers => &[
            ("ASTS", "AST SpaceMobile, Inc."),
            ("RKLB", "Rocket Lab USA, Inc."),
            ("ACHR", "Archer Aviation Inc."),
            ("JOBY", "Joby Aviation, Inc."),
            ("LUNR", "Intuitive Machines, Inc."),
            ("RDW", "Redwire Corporation"),
            ("EVLV", "Evolv Technologies Holdings, Inc."),
            ("OUST", "Ouster, Inc."),
            ("SOUN", "SoundHound AI, Inc."),
            ("BBAI", "BigBear.ai Holdings, Inc."),
            ("KULR", "KULR Technology Group, Inc."),
            ("SERV", "Serve Robotics Inc."),
            ("RCAT", "Red Cat Holdings, Inc."),
            ("LPTH", "LightPath Technologies, Inc."),
            ("VUZI", "Vuzix Corporation"),
            ("MVIS", "MicroVision, Inc."),
            ("AEVA", "Aeva Technologies, Inc."),
            ("INVZ", "Innoviz Technologies Ltd."),
            ("CRNC", "Cerence Inc."),
            ("DM", "Desktop Metal, Inc."),
            ("MKFG", "Markforged Holding Corporation"),
            ("VLD", "Velo3D, Inc."),
            ("NNDM", "Nano Dimension Ltd."),
            ("SSYS", "Stratasys Ltd."),
            ("XMTR", "Xometry, Inc."),
        ],
    }
}

/// Generate deterministic mock rows for a screener. The same call always
/// returns the same rows; numbers derive from a symbol hash.
fn screen(kind: ScreenerKind, limit: usize) -> Vec<ScreenerRow> {
    universe(kind)
        .iter()
        .take(limit)
        .map(|(symbol, name)| {
            let hash: u32 = symbol
                .bytes()
                .chain(kind.key().bytes())
                .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));

            let price = match kind {
                ScreenerKind::SmallCapGainers => 2.0 + ((hash % 2800) as f64) / 100.0,
                ScreenerKind::UndervaluedLargeCaps => 15.0 + ((hash % 6000) as f64) / 100.0,
                _ => 10.0 + ((hash % 49000) as f64) / 100.0,
            };

            let change_pct = match kind {
                ScreenerKind::DayLosers => -2.0 - ((hash % 1200) as f64) / 100.0,
                ScreenerKind::DayGainers | ScreenerKind::SmallCapGainers => {
                    2.0 + ((hash % 1800) as f64) / 100.0
                }
                _ => ((hash % 1000) as f64) / 100.0 - 5.0,
            };

            let volume = match kind {
                ScreenerKind::MostActives => 40_000_000 + (hash as u64 % 160_000_000),
                ScreenerKind::SmallCapGainers => 500_000 + (hash as u64 % 9_500_000),
                _ => 1_000_000 + (hash as u64 % 49_000_000),
            };

            let market_cap = match kind {
                ScreenerKind::SmallCapGainers => 100_000_000 + (hash as u64 % 1_900_000_000),
                ScreenerKind::UndervaluedLargeCaps | ScreenerKind::MostActives => {
                    10_000_000_000 + (hash as u64 * 7919) % 2_000_000_000_000
                }
                _ => 1_000_000_000 + (hash as u64 * 7919) % 500_000_000_000,
            };

            ScreenerRow {
                symbol: symbol.to_string(),
                name: name.to_string(),
                price: (price * 100.0).round() / 100.0,
                change_pct: (change_pct * 100.0).round() / 100.0,
                volume,
                market_cap,
            }
        })
        .collect()
}

/// Render screener rows as a fixed-width text table the model can read back.
fn render_table(kind: ScreenerKind, rows: &[ScreenerRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} — top {} results\n\n", kind.title(), rows.len()));
    out.push_str(&format!(
        "{:<7} {:<36} {:>10} {:>9} {:>12} {:>12}\n",
        "Symbol", "Name", "Price", "Change%", "Volume", "Mkt Cap"
    ));
    for row in rows {
        out.push_str(&format!(
            "{:<7} {:<36} {:>10.2} {:>+8.2}% {:>12} {:>12}\n",
            row.symbol,
            row.name,
            row.price,
            row.change_pct,
            format_compact(row.volume),
            format_compact(row.market_cap),
        ));
    }
    out
}

/// Compact human notation: 1.5M, 2.3B.
fn format_compact(n: u64) -> String {
    if n >= 1_000_000_000_000 {
        format!("{:.2}T", n as f64 / 1e12)
    } else if n >= 1_000_000_000 {
        format!("{:.2}B", n as f64 / 1e9)
    } else if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1e6)
    } else if n >= 1_000 {
        format!("{:.2}K", n as f64 / 1e3)
    } else {
        n.to_string()
    }
}
