//! Static ISO 3166-1 alpha-2 country to continent table.
//!
//! Kept local so continent resolution works offline and never depends on the
//! geocoder returning more than a country code.

use super::Continent;

pub fn continent_for_country(code: &str) -> Option<Continent> {
    match code {
        "AD" | "AL" | "AT" | "AX" | "BA" | "BE" | "BG" | "BY" | "CH" | "CY" | "CZ" | "DE"
        | "DK" | "EE" | "ES" | "FI" | "FO" | "FR" | "GB" | "GG" | "GI" | "GR" | "HR" | "HU"
        | "IE" | "IM" | "IS" | "IT" | "JE" | "LI" | "LT" | "LU" | "LV" | "MC" | "MD" | "ME"
        | "MK" | "MT" | "NL" | "NO" | "PL" | "PT" | "RO" | "RS" | "RU" | "SE" | "SI" | "SJ"
        | "SK" | "SM" | "UA" | "VA" | "XK" => Some(Continent::Europe),

        "AE" | "AF" | "AM" | "AZ" | "BD" | "BH" | "BN" | "BT" | "CN" | "GE" | "HK" | "ID"
        | "IL" | "IN" | "IQ" | "IR" | "JO" | "JP" | "KG" | "KH" | "KP" | "KR" | "KW" | "KZ"
        | "LA" | "LB" | "LK" | "MM" | "MN" | "MO" | "MV" | "MY" | "NP" | "OM" | "PH" | "PK"
        | "PS" | "QA" | "SA" | "SG" | "SY" | "TH" | "TJ" | "TL" | "TM" | "TR" | "TW" | "UZ"
        | "VN" | "YE" => Some(Continent::Asia),

        "AO" | "BF" | "BI" | "BJ" | "BW" | "CD" | "CF" | "CG" | "CI" | "CM" | "CV" | "DJ"
        | "DZ" | "EG" | "EH" | "ER" | "ET" | "GA" | "GH" | "GM" | "GN" | "GQ" | "GW" | "KE"
        | "KM" | "LR" | "LS" | "LY" | "MA" | "MG" | "ML" | "MR" | "MU" | "MW" | "MZ" | "NA"
        | "NE" | "NG" | "RE" | "RW" | "SC" | "SD" | "SH" | "SL" | "SN" | "SO" | "SS" | "ST"
        | "SZ" | "TD" | "TG" | "TN" | "TZ" | "UG" | "YT" | "ZA" | "ZM" | "ZW" => {
            Some(Continent::Africa)
        }

        "AG" | "AI" | "AW" | "BB" | "BL" | "BM" | "BS" | "BZ" | "CA" | "CR" | "CU" | "CW"
        | "DM" | "DO" | "GD" | "GL" | "GP" | "GT" | "HN" | "HT" | "JM" | "KN" | "KY" | "LC"
        | "MF" | "MQ" | "MS" | "MX" | "NI" | "PA" | "PM" | "PR" | "SV" | "SX" | "TC" | "TT"
        | "US" | "VC" | "VG" | "VI" => Some(Continent::NorthAmerica),

        "AR" | "BO" | "BR" | "CL" | "CO" | "EC" | "FK" | "GF" | "GY" | "PE" | "PY" | "SR"
        | "UY" | "VE" => Some(Continent::SouthAmerica),

        "AS" | "AU" | "CK" | "FJ" | "FM" | "GU" | "KI" | "MH" | "MP" | "NC" | "NF" | "NR"
        | "NU" | "NZ" | "PF" | "PG" | "PN" | "PW" | "SB" | "TK" | "TO" | "TV" | "VU" | "WF"
        | "WS" => Some(Continent::Oceania),

        _ => None,
    }
}
