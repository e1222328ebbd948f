use std::collections::HashMap;
use std::sync::LazyLock;

/// Spreadsheet spelling → map spelling.
///
/// The right-hand side follows the map file exactly, including its own
/// typos (`Kinkkale`, `Zinguldak`), since those are the join keys.
pub const PROVINCE_NAME_CORRECTIONS: &[(&str, &str)] = &[
    ("Adıyaman", "Adiyaman"),
    ("Afyon_Karahisar", "Afyonkarahisar"),
    ("Ağrı", "Agri"),
    ("Aydın", "Aydin"),
    ("Balıkesir", "Balikesir"),
    ("Diyarbakır", "Diyarbakir"),
    ("Elazığ", "Elazig"),
    ("Eskişehir", "Eskisehir"),
    ("Gümüşhane", "Gümüshane"),
    ("Iğdır", "Iğdir"),
    ("İstanbul", "Istanbul"),
    ("İzmir", "Izmir"),
    ("K.Maraş", "K. Maras"),
    ("Kırklareli", "Kirklareli"),
    ("Kırıkkalae", "Kinkkale"),
    ("Kırşehir", "Kirsehir"),
    ("Muğla", "Mugla"),
    ("Muş", "Mus"),
    ("Nevşehir", "Nevsehir"),
    ("Niğde", "Nigde"),
    ("Tekirdağ", "Tekirdag"),
    ("Urfa", "Sanliurfa"),
    ("Uşak", "Usak"),
    ("Zonguldak", "Zinguldak"),
    ("Çankırı", "Çankiri"),
    ("Şırnak", "Sirnak"),
];

static CORRECTIONS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| PROVINCE_NAME_CORRECTIONS.iter().copied().collect());

/// Returns the map spelling of a spreadsheet province name.
///
/// Matching is exact: no trimming, case folding or fuzzy comparison.
///
/// ```
/// use taxmap_names::canonical_province_name;
///
/// assert_eq!(canonical_province_name("Adıyaman"), "Adiyaman");
/// assert_eq!(canonical_province_name("Ankara"), "Ankara");
/// ```
pub fn canonical_province_name(name: &str) -> &str {
    CORRECTIONS.get(name).copied().unwrap_or(name)
}

/// Returns true when `name` has an entry in the correction table.
pub fn is_corrected(name: &str) -> bool {
    CORRECTIONS.contains_key(name)
}
