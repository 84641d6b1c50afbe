/// Columns of a DMA `aisdk` day file that this crate knows how to read.
///
/// The header names are matched exactly, including the leading `# ` on the
/// timestamp column.
//  # Timestamp,Type of mobile,MMSI,Latitude,Longitude,Navigational status,ROT,SOG,COG,Heading,IMO,Callsign,Name,Ship type,...
//  23/06/2017 00:44:23,Class A,305484000,56.134323,11.474578,Under way using engine,0.0,6.8,268.1,264,9428217,V2EN3,ICE MOON,Cargo,...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Timestamp,
    MobileType,
    Mmsi,
    Latitude,
    Longitude,
    NavigationalStatus,
    Rot,
    Sog,
    Cog,
    Callsign,
    Name,
    ShipType,
}

impl Column {
    pub fn header(self) -> &'static str {
        match self {
            Column::Timestamp => "# Timestamp",
            Column::MobileType => "Type of mobile",
            Column::Mmsi => "MMSI",
            Column::Latitude => "Latitude",
            Column::Longitude => "Longitude",
            Column::NavigationalStatus => "Navigational status",
            Column::Rot => "ROT",
            Column::Sog => "SOG",
            Column::Cog => "COG",
            Column::Callsign => "Callsign",
            Column::Name => "Name",
            Column::ShipType => "Ship type",
        }
    }
}

/// One row of a day file, holding only the columns that were loaded.
///
/// Text fields keep the exact input bytes so they can be written back
/// unchanged. Columns that were not loaded stay empty. Rows are filled by
/// header index instead of serde deserialization because the loaded column
/// set changes with the configured projection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub timestamp: String,
    pub mobile_type: String,
    pub mmsi: String,
    pub latitude: String,
    pub longitude: String,
    pub status: String,
    pub rot: String,
    pub sog: String,
    pub cog: String,
    pub callsign: String,
    pub name: String,
    pub ship_type: String,
    /// Parsed `latitude`, `None` when the field is empty.
    pub lat: Option<f64>,
    /// Parsed `longitude`, `None` when the field is empty.
    pub lon: Option<f64>,
}

impl Record {
    pub fn field(&self, column: Column) -> &str {
        match column {
            Column::Timestamp => &self.timestamp,
            Column::MobileType => &self.mobile_type,
            Column::Mmsi => &self.mmsi,
            Column::Latitude => &self.latitude,
            Column::Longitude => &self.longitude,
            Column::NavigationalStatus => &self.status,
            Column::Rot => &self.rot,
            Column::Sog => &self.sog,
            Column::Cog => &self.cog,
            Column::Callsign => &self.callsign,
            Column::Name => &self.name,
            Column::ShipType => &self.ship_type,
        }
    }

    pub fn set_field(&mut self, column: Column, value: &str) {
        let slot = match column {
            Column::Timestamp => &mut self.timestamp,
            Column::MobileType => &mut self.mobile_type,
            Column::Mmsi => &mut self.mmsi,
            Column::Latitude => &mut self.latitude,
            Column::Longitude => &mut self.longitude,
            Column::NavigationalStatus => &mut self.status,
            Column::Rot => &mut self.rot,
            Column::Sog => &mut self.sog,
            Column::Cog => &mut self.cog,
            Column::Callsign => &mut self.callsign,
            Column::Name => &mut self.name,
            Column::ShipType => &mut self.ship_type,
        };
        *slot = value.to_owned();
    }
}

/// Static vessel fields used by the trajectory lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VesselInfo {
    pub mobile_type: String,
    pub mmsi: u64,
    pub callsign: String,
    pub name: String,
    pub ship_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_reads_back_what_was_set() {
        let mut record = Record::default();
        record.set_field(Column::NavigationalStatus, "Under way using engine");
        record.set_field(Column::Latitude, "57.30");

        assert_eq!(record.field(Column::NavigationalStatus), "Under way using engine");
        assert_eq!(record.status, "Under way using engine");
        assert_eq!(record.field(Column::Latitude), "57.30");
        assert_eq!(record.field(Column::Callsign), "");
    }

    #[test]
    fn timestamp_header_keeps_hash_prefix() {
        assert_eq!(Column::Timestamp.header(), "# Timestamp");
        assert_eq!(Column::ShipType.header(), "Ship type");
    }
}
