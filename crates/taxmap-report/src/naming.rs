//! Map titles and artifact file names.

/// Characters replaced with `_` in file names.
const INVALID_FILE_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// The three rendered maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapKind {
    Accrual,
    Collection,
    Ratio,
}

impl MapKind {
    pub const ALL: [MapKind; 3] = [MapKind::Accrual, MapKind::Collection, MapKind::Ratio];

    /// Heading drawn above the map.
    pub fn title(self, year_label: &str, category_title: &str) -> String {
        match self {
            MapKind::Accrual => {
                format!("{year_label} İllere Göre {category_title} Tahakkuku (Milyar TL)")
            }
            MapKind::Collection => {
                format!("{year_label} İllere Göre {category_title} Tahsilatı (Milyar TL)")
            }
            MapKind::Ratio => {
                format!("{year_label} İllere Göre {category_title} Tahsilat Oranı (%)")
            }
        }
    }

    /// Position in [`MapKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            MapKind::Accrual => 0,
            MapKind::Collection => 1,
            MapKind::Ratio => 2,
        }
    }

    fn file_suffix(self) -> &'static str {
        match self {
            MapKind::Accrual => "Tahakkuk_Haritasi",
            MapKind::Collection => "Tahsilat_Haritasi",
            MapKind::Ratio => "Tahsilat_Orani_Haritasi",
        }
    }
}

/// Replaces characters that are not allowed in file names with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if INVALID_FILE_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// File names of everything produced for one (year, category) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    pub accrual_map: String,
    pub collection_map: String,
    pub ratio_map: String,
    /// SVG sources of the maps, in `MapKind::ALL` order.
    pub sources: [String; 3],
    pub data_csv: String,
    pub archive: String,
}

impl ArtifactNames {
    pub fn new(year_label: &str, category_title: &str) -> Self {
        let stem = sanitize_file_name(&format!("{year_label}_{category_title}"));
        let map = |kind: MapKind, extension: &str| {
            format!("{stem}_{}.{extension}", kind.file_suffix())
        };
        Self {
            accrual_map: map(MapKind::Accrual, "png"),
            collection_map: map(MapKind::Collection, "png"),
            ratio_map: map(MapKind::Ratio, "png"),
            sources: MapKind::ALL.map(|kind| map(kind, "svg")),
            data_csv: format!("{stem}_Veriler.csv"),
            archive: format!("{stem}_Haritalar.zip"),
        }
    }

    pub fn map(&self, kind: MapKind) -> &str {
        match kind {
            MapKind::Accrual => &self.accrual_map,
            MapKind::Collection => &self.collection_map,
            MapKind::Ratio => &self.ratio_map,
        }
    }

    pub fn source(&self, kind: MapKind) -> &str {
        &self.sources[kind.index()]
    }
}
