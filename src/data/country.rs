//! Country-name normalization.
//!
//! Spread providers and bond issuers spell countries differently (English,
//! Italian, bond-program names like `BTP VALORE`). Everything is collapsed
//! onto one canonical key so the spread map, the trust rules, and the
//! issuer strings can be joined.

/// Normalize a country/issuer label to its canonical key.
///
/// Unrecognized names pass through uppercased and stripped, so a direct
/// spread-map hit is still possible for countries outside the alias table.
pub fn normalize(country: &str) -> String {
    let upper = country
        .to_uppercase()
        .replace("GREEN", "")
        .replace("BOND", "")
        .replace("BTPI", "ITALIA")
        .replace("BTP", "ITALIA")
        .replace("FUTURA", "")
        .replace(" PIU'", "")
        .replace("VALORE", "")
        .trim()
        .to_string();

    let canonical = match upper.as_str() {
        "ITALY" | "ITALIA" | "REPUBLIC OF ITALY" | "REPUBBLICA ITALIANA" | "ITALY ITALIA" => "ITALIA",
        "SWITZERLAND" => "SVIZZERA",
        "LUXEMBOURG" => "LUSSEMBURGO",
        "GERMANY" | "DEUTSCHLAND" | "BUNDESREPUBLIK DEUTSCHLAND" | "GERMANIA" => "GERMANIA",
        "FRANCE" | "FRANCIA" => "FRANCIA",
        "SPAIN" | "ESPANA" | "SPAGNA" => "SPAGNA",
        "PORTUGAL" | "PORTOGALLO" => "PORTOGALLO",
        "GREECE" | "ELLAS" | "GRECIA" | "REPUBBLICA GRECA" => "GRECIA",
        "CZECH REPUBLIC" => "REPUBBLICA CECA",
        "SLOVAKIA" => "SLOVACCHIA",
        "IRELAND" | "IRLANDA" => "IRLANDA",
        "NETHERLANDS" | "HOLLAND" | "PAESI BASSI" | "OLANDA" => "OLANDA",
        "BELGIUM" | "BELGIO" => "BELGIO",
        "AUSTRIA" => "AUSTRIA",
        "FINLAND" | "FINLANDIA" => "FINLANDIA",
        "DENMARK" => "DANIMARCA",
        "SWEDEN" | "SVEZIA" => "SVEZIA",
        "NORWAY" | "NORVEGIA" => "NORVEGIA",
        "UNITED KINGDOM" | "UK" | "GREAT BRITAIN" | "REGNO UNITO" | "GRAN BRETAGNA" => "REGNO UNITO",
        "ROMANIA" | "RUMANIA" => "ROMANIA",
        "POLAND" | "POLONIA" => "POLONIA",
        "HUNGARY" | "UNGHERIA" => "UNGHERIA",
        "BULGARIA" => "BULGARIA",
        "CROATIA" | "CROAZIA" => "CROAZIA",
        "SLOVENIA" => "SLOVENIA",
        "ESTONIA" => "ESTONIA",
        "LATVIA" | "LETTONIA" => "LETTONIA",
        "LITHUANIA" | "LITUANIA" => "LITUANIA",
        "CHILE" | "CILE" => "CILE",
        "MEXICO" | "MEXICAN STATES" => "MESSICO",
        "CYPRUS" | "CIPRO" => "CIPRO",
        "TURKEY" | "TURCHIA" | "TÜRKIYE" => "TURCHIA",
        "BRAZIL" => "BRASILE",
        "UNITED STATES" => "USA",
        "JAPAN" => "GIAPPONE",
        "SOUTH AFRICA" => "SUDAFRICA",
        other => other,
    };

    canonical.to_string()
}
