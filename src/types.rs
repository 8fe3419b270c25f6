//! Types for the Bitcoin conversion SDK

use crate::error::ConversionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

macro_rules! currency_codes {
    ($($code:ident => $name:literal,)+) => {
        /// Currency codes accepted by the fiat rate providers
        ///
        /// A closed set of ISO-4217-style fiat codes plus `BTC` and `XBT`
        /// for bitcoin itself. Codes are not checked against what an upstream
        /// actually quotes; an unquoted code fails the fetch instead.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum CurrencyCode {
            $(
                #[doc = $name]
                $code,
            )+
        }

        impl CurrencyCode {
            const VARIANTS: &'static [CurrencyCode] = &[$(CurrencyCode::$code,)+];

            /// Get the upper-case currency code
            pub fn code(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$code => stringify!($code),)+
                }
            }

            /// Get the human readable currency name
            pub fn name(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$code => $name,)+
                }
            }
        }
    };
}

currency_codes! {
    AED => "United Arab Emirates Dirham",
    AFN => "Afghan Afghani",
    ALL => "Albanian Lek",
    AMD => "Armenian Dram",
    ANG => "Netherlands Antillean Guilder",
    AOA => "Angolan Kwanza",
    ARS => "Argentine Peso",
    AUD => "Australian Dollar",
    AWG => "Aruban Florin",
    AZN => "Azerbaijani Manat",
    BAM => "Bosnia-Herzegovina Convertible Mark",
    BBD => "Barbadian Dollar",
    BDT => "Bangladeshi Taka",
    BGN => "Bulgarian Lev",
    BHD => "Bahraini Dinar",
    BIF => "Burundian Franc",
    BMD => "Bermudan Dollar",
    BND => "Brunei Dollar",
    BOB => "Bolivian Boliviano",
    BRL => "Brazilian Real",
    BSD => "Bahamian Dollar",
    BTC => "Bitcoin",
    BTN => "Bhutanese Ngultrum",
    BWP => "Botswanan Pula",
    BYR => "Belarusian Ruble",
    BZD => "Belize Dollar",
    CAD => "Canadian Dollar",
    CDF => "Congolese Franc",
    CHF => "Swiss Franc",
    CLF => "Chilean Unit of Account (UF)",
    CLP => "Chilean Peso",
    CNY => "Chinese Yuan",
    COP => "Colombian Peso",
    CRC => "Costa Rican Colón",
    CUP => "Cuban Peso",
    CVE => "Cape Verdean Escudo",
    CZK => "Czech Republic Koruna",
    DJF => "Djiboutian Franc",
    DKK => "Danish Krone",
    DOP => "Dominican Peso",
    DZD => "Algerian Dinar",
    EEK => "Estonian Kroon",
    EGP => "Egyptian Pound",
    ERN => "Eritrean Nnakfa",
    ETB => "Ethiopian Birr",
    EUR => "Euro",
    FJD => "Fijian Dollar",
    FKP => "Falkland Islands Pound",
    GBP => "British Pound Sterling",
    GEL => "Georgian Lari",
    GHS => "Ghanaian Cedi",
    GIP => "Gibraltar Pound",
    GMD => "Gambian Dalasi",
    GNF => "Guinean Franc",
    GTQ => "Guatemalan Quetzal",
    GYD => "Guyanaese Dollar",
    HKD => "Hong Kong Dollar",
    HNL => "Honduran Lempira",
    HRK => "Croatian Kuna",
    HTG => "Haitian Gourde",
    HUF => "Hungarian Forint",
    IDR => "Indonesian Rupiah",
    ILS => "Israeli New Sheqel",
    INR => "Indian Rupee",
    IQD => "Iraqi Dinar",
    IRR => "Iranian Rial",
    ISK => "Icelandic Króna",
    JEP => "Jersey Pound",
    JMD => "Jamaican Dollar",
    JOD => "Jordanian Dinar",
    JPY => "Japanese Yen",
    KES => "Kenyan Shilling",
    KGS => "Kyrgystani Som",
    KHR => "Cambodian Riel",
    KMF => "Comorian Franc",
    KPW => "North Korean Won",
    KRW => "South Korean Won",
    KWD => "Kuwaiti Dinar",
    KYD => "Cayman Islands Dollar",
    KZT => "Kazakhstani Tenge",
    LAK => "Laotian Kip",
    LBP => "Lebanese Pound",
    LKR => "Sri Lankan Rupee",
    LRD => "Liberian Dollar",
    LSL => "Lesotho Loti",
    LTL => "Lithuanian Litas",
    LVL => "Latvian Lats",
    LYD => "Libyan Dinar",
    MAD => "Moroccan Dirham",
    MDL => "Moldovan Leu",
    MGA => "Malagasy Ariary",
    MKD => "Macedonian Denar",
    MMK => "Myanma Kyat",
    MNT => "Mongolian Tugrik",
    MOP => "Macanese Pataca",
    MRO => "Mauritanian Ouguiya",
    MTL => "Maltese Lira",
    MUR => "Mauritian Rupee",
    MVR => "Maldivian Rufiyaa",
    MWK => "Malawian Kwacha",
    MXN => "Mexican Peso",
    MYR => "Malaysian Ringgit",
    MZN => "Mozambican Metical",
    NAD => "Namibian Dollar",
    NGN => "Nigerian Naira",
    NIO => "Nicaraguan Córdoba",
    NOK => "Norwegian Krone",
    NPR => "Nepalese Rupee",
    NZD => "New Zealand Dollar",
    OMR => "Omani Rial",
    PAB => "Panamanian Balboa",
    PEN => "Peruvian Nuevo Sol",
    PGK => "Papua New Guinean Kina",
    PHP => "Philippine Peso",
    PKR => "Pakistani Rupee",
    PLN => "Polish Zloty",
    PYG => "Paraguayan Guarani",
    QAR => "Qatari Rial",
    RON => "Romanian Leu",
    RSD => "Serbian Dinar",
    RUB => "Russian Ruble",
    RWF => "Rwandan Franc",
    SAR => "Saudi Riyal",
    SBD => "Solomon Islands Dollar",
    SCR => "Seychellois Rupee",
    SDG => "Sudanese Pound",
    SEK => "Swedish Krona",
    SGD => "Singapore Dollar",
    SHP => "Saint Helena Pound",
    SLL => "Sierra Leonean Leone",
    SOS => "Somali Shilling",
    SRD => "Surinamese Dollar",
    STD => "São Tomé and Príncipe Dobra",
    SVC => "Salvadoran Colón",
    SYP => "Syrian Pound",
    SZL => "Swazi Lilangeni",
    THB => "Thai Baht",
    TJS => "Tajikistani Somoni",
    TMT => "Turkmenistani Manat",
    TND => "Tunisian Dinar",
    TOP => "Tongan Paʻanga",
    TRY => "Turkish Lira",
    TTD => "Trinidad and Tobago Dollar",
    TWD => "New Taiwan Dollar",
    TZS => "Tanzanian Shilling",
    UAH => "Ukrainian Hryvnia",
    UGX => "Ugandan Shilling",
    USD => "United States Dollar",
    UYU => "Uruguayan Peso",
    UZS => "Uzbekistan Som",
    VEF => "Venezuelan Bolívar Fuerte",
    VND => "Vietnamese Dong",
    VUV => "Vanuatu Vatu",
    WST => "Samoan Tala",
    XAF => "CFA Franc BEAC",
    XAG => "Silver (troy ounce)",
    XAU => "Gold (troy ounce)",
    XBT => "Bitcoin",
    XCD => "East Caribbean Dollar",
    XDR => "Special Drawing Rights",
    XOF => "CFA Franc BCEAO",
    XPF => "CFP Franc",
    YER => "Yemeni Rial",
    ZAR => "South African Rand",
    ZMK => "Zambian Kwacha (pre-2013)",
    ZMW => "Zambian Kwacha",
    ZWL => "Zimbabwean Dollar",
}

impl CurrencyCode {
    /// Get all supported currency codes
    pub fn all() -> &'static [CurrencyCode] {
        Self::VARIANTS
    }

    /// Get the lower-case code, as used in legacy index URLs
    pub fn lowercase(&self) -> String {
        self.code().to_ascii_lowercase()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::VARIANTS
            .iter()
            .copied()
            .find(|c| c.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConversionError::UnsupportedCode(s.to_string()))
    }
}

/// Alternative assets quoted in BTC by xchain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Token {
    /// PEPECASH counterparty asset
    Pepecash,
    /// Counterparty XCP
    Xcp,
}

impl Token {
    /// Get the asset symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Token::Pepecash => "PEPECASH",
            Token::Xcp => "XCP",
        }
    }

    /// Get all supported tokens
    pub fn all() -> &'static [Token] {
        &[Token::Pepecash, Token::Xcp]
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Token {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|t| t.symbol().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConversionError::UnsupportedCode(s.to_string()))
    }
}

/// Cryptocurrencies quoted in BTC by CryptoCompare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CryptoCode {
    /// Ether
    ETH,
}

impl CryptoCode {
    /// Get the ticker symbol
    pub fn code(&self) -> &'static str {
        match self {
            CryptoCode::ETH => "ETH",
        }
    }
}

impl fmt::Display for CryptoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CryptoCode {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ETH" => Ok(CryptoCode::ETH),
            _ => Err(ConversionError::UnsupportedCode(s.to_string())),
        }
    }
}

/// A fiat rate remembered by the [`RateCache`](crate::cache::RateCache)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCacheEntry {
    /// Normalized decimal string, e.g. `"17000.00"`
    pub rate: String,

    /// Unix epoch milliseconds at which the rate was fetched
    pub fetched_at_ms: i64,
}

impl RateCacheEntry {
    /// Create a new cache entry
    pub fn new(rate: String, fetched_at_ms: i64) -> Self {
        Self {
            rate,
            fetched_at_ms,
        }
    }

    /// Check whether the entry is younger than `ttl` at `now_ms`
    ///
    /// A zero TTL makes every entry stale.
    pub fn is_fresh(&self, now_ms: i64, ttl: Duration) -> bool {
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        now_ms.saturating_sub(self.fetched_at_ms) < ttl_ms
    }
}
