use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Vessel categories recognized by the tariff. Closed set; rules reference
/// these and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VesselType {
    Tankers,
    ContainerVessels,
    RoroVessels,
    CarCarriers,
    RopaxPassengerVessels,
    CruiseVessels,
    BreakBulkLoloVessels,
    InlandWaterways,
    Yachts,
    ArchipelagoTraffic,
    HarbourVessels,
    OtherVessels,
}

impl fmt::Display for VesselType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VesselType::Tankers => "tankers",
            VesselType::ContainerVessels => "container vessels",
            VesselType::RoroVessels => "RoRo vessels",
            VesselType::CarCarriers => "car carriers",
            VesselType::RopaxPassengerVessels => "RoPax passenger vessels",
            VesselType::CruiseVessels => "cruise vessels",
            VesselType::BreakBulkLoloVessels => "break bulk / LoLo vessels",
            VesselType::InlandWaterways => "inland waterway vessels",
            VesselType::Yachts => "yachts",
            VesselType::ArchipelagoTraffic => "archipelago traffic",
            VesselType::HarbourVessels => "harbour vessels",
            VesselType::OtherVessels => "other vessels",
        };
        write!(f, "{s}")
    }
}

/// Chargeable categories of a port call. Every calculation produces exactly
/// one line item per variant, applicable or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TariffComponent {
    PortInfrastructureDues,
    ShipGeneratedSolidWaste,
    SludgeOilyBilgeWater,
    ScrubberWaste,
    FreshWater,
    RinsingWater,
    LayUpDues,
    ConnectingToOps,
    IspsFees,
    PassengerDues,
    BlackGreyWater,
    Pilotage,
    PassingVesselDues,
    PortDuesForCargo,
}

impl TariffComponent {
    /// All components, in the order line items are reported.
    pub const ALL: [TariffComponent; 14] = [
        TariffComponent::PortInfrastructureDues,
        TariffComponent::ShipGeneratedSolidWaste,
        TariffComponent::SludgeOilyBilgeWater,
        TariffComponent::ScrubberWaste,
        TariffComponent::FreshWater,
        TariffComponent::RinsingWater,
        TariffComponent::LayUpDues,
        TariffComponent::ConnectingToOps,
        TariffComponent::IspsFees,
        TariffComponent::PassengerDues,
        TariffComponent::BlackGreyWater,
        TariffComponent::Pilotage,
        TariffComponent::PassingVesselDues,
        TariffComponent::PortDuesForCargo,
    ];
}

impl fmt::Display for TariffComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TariffComponent::PortInfrastructureDues => "port infrastructure dues",
            TariffComponent::ShipGeneratedSolidWaste => "ship-generated solid waste",
            TariffComponent::SludgeOilyBilgeWater => "sludge / oily bilge water",
            TariffComponent::ScrubberWaste => "scrubber waste",
            TariffComponent::FreshWater => "fresh water",
            TariffComponent::RinsingWater => "rinsing water",
            TariffComponent::LayUpDues => "lay-up dues",
            TariffComponent::ConnectingToOps => "connecting to OPS",
            TariffComponent::IspsFees => "ISPS fees",
            TariffComponent::PassengerDues => "passenger dues",
            TariffComponent::BlackGreyWater => "black / grey water",
            TariffComponent::Pilotage => "pilotage",
            TariffComponent::PassingVesselDues => "passing vessel dues",
            TariffComponent::PortDuesForCargo => "port dues for cargo",
        };
        write!(f, "{s}")
    }
}

/// Arrival region of the call. An unknown region is `None` on the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "EU")]
    Eu,
    #[serde(rename = "non_EU")]
    NonEu,
    #[serde(rename = "domestic")]
    Domestic,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Eu => write!(f, "EU"),
            Region::NonEu => write!(f, "non-EU"),
            Region::Domestic => write!(f, "domestic"),
        }
    }
}

/// Numeric query attributes. Usable as a band key, a per-unit charging
/// basis, or the subject of a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    GrossTonnage,
    DeadweightTonnage,
    LengthOverall,
    Teu,
    Passengers,
    CallsPerWeek,
    LayupDays,
    SludgeVolume,
    SolidWasteVolume,
    FreshWater,
    RinsingWater,
    BlackGreyWater,
    CargoTonnage,
    EsiScore,
    FossilFreeFuelShare,
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NumericField::GrossTonnage => "gross tonnage",
            NumericField::DeadweightTonnage => "deadweight tonnage",
            NumericField::LengthOverall => "length overall",
            NumericField::Teu => "TEU",
            NumericField::Passengers => "passengers",
            NumericField::CallsPerWeek => "calls per week",
            NumericField::LayupDays => "lay-up days",
            NumericField::SludgeVolume => "sludge volume",
            NumericField::SolidWasteVolume => "solid waste volume",
            NumericField::FreshWater => "fresh water volume",
            NumericField::RinsingWater => "rinsing water",
            NumericField::BlackGreyWater => "black/grey water volume",
            NumericField::CargoTonnage => "cargo tonnage",
            NumericField::EsiScore => "ESI score",
            NumericField::FossilFreeFuelShare => "fossil-free fuel share",
        };
        write!(f, "{s}")
    }
}

/// Boolean query attributes usable in conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagField {
    WasteCertificate,
    UseOps,
    InlandWaterway,
    ShortSeaShipping,
}

impl fmt::Display for FlagField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FlagField::WasteCertificate => "waste certificate",
            FlagField::UseOps => "OPS connection",
            FlagField::InlandWaterway => "inland waterway",
            FlagField::ShortSeaShipping => "short sea shipping",
        };
        write!(f, "{s}")
    }
}

/// Physical vessel attributes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VesselDetails {
    #[serde(default)]
    pub gross_tonnage: Option<Decimal>,
    #[serde(default)]
    pub deadweight_tonnage: Option<Decimal>,
    #[serde(default)]
    pub length_overall_m: Option<Decimal>,
    #[serde(default)]
    pub teu: Option<u32>,
    #[serde(default)]
    pub passengers: Option<u32>,
}

/// Context of the port call itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallContext {
    #[serde(default)]
    pub arrival_region: Option<Region>,
    #[serde(default)]
    pub calls_per_week: Option<u32>,
    #[serde(default)]
    pub layup_days: Option<u32>,
    #[serde(default)]
    pub use_ops: Option<bool>,
    #[serde(default)]
    pub is_inland_waterway: Option<bool>,
    #[serde(default)]
    pub is_short_sea_shipping: Option<bool>,
}

/// Deliverable quantities declared for the call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Quantities {
    #[serde(default)]
    pub sludge_volume_m3: Option<Decimal>,
    #[serde(default)]
    pub solid_waste_volume_m3: Option<Decimal>,
    #[serde(default)]
    pub fresh_water_m3: Option<Decimal>,
    #[serde(default)]
    pub rinsing_water_tons: Option<Decimal>,
    #[serde(default)]
    pub black_grey_water_m3: Option<Decimal>,
    #[serde(default)]
    pub cargo_tonnage_tons: Option<Decimal>,
}

/// Environmental scores and certificates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Environmental {
    #[serde(default)]
    pub esi_score: Option<Decimal>,
    #[serde(default)]
    pub fossil_free_fuel_share: Option<Decimal>,
    #[serde(default)]
    pub waste_certificate: Option<bool>,
}

/// Structured representation of one query, produced upstream and treated as
/// read-only input here. Unset fields simply fail the conditions that
/// depend on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryParameters {
    pub vessel_type: VesselType,
    #[serde(default)]
    pub vessel_details: VesselDetails,
    #[serde(default)]
    pub call_context: CallContext,
    #[serde(default)]
    pub quantities: Quantities,
    #[serde(default)]
    pub environmental: Environmental,
}

impl QueryParameters {
    pub fn new(vessel_type: VesselType) -> Self {
        QueryParameters {
            vessel_type,
            vessel_details: VesselDetails::default(),
            call_context: CallContext::default(),
            quantities: Quantities::default(),
            environmental: Environmental::default(),
        }
    }

    /// Value of a numeric attribute, if set on the query.
    pub fn numeric(&self, field: NumericField) -> Option<Decimal> {
        match field {
            NumericField::GrossTonnage => self.vessel_details.gross_tonnage,
            NumericField::DeadweightTonnage => self.vessel_details.deadweight_tonnage,
            NumericField::LengthOverall => self.vessel_details.length_overall_m,
            NumericField::Teu => self.vessel_details.teu.map(Decimal::from),
            NumericField::Passengers => self.vessel_details.passengers.map(Decimal::from),
            NumericField::CallsPerWeek => self.call_context.calls_per_week.map(Decimal::from),
            NumericField::LayupDays => self.call_context.layup_days.map(Decimal::from),
            NumericField::SludgeVolume => self.quantities.sludge_volume_m3,
            NumericField::SolidWasteVolume => self.quantities.solid_waste_volume_m3,
            NumericField::FreshWater => self.quantities.fresh_water_m3,
            NumericField::RinsingWater => self.quantities.rinsing_water_tons,
            NumericField::BlackGreyWater => self.quantities.black_grey_water_m3,
            NumericField::CargoTonnage => self.quantities.cargo_tonnage_tons,
            NumericField::EsiScore => self.environmental.esi_score,
            NumericField::FossilFreeFuelShare => self.environmental.fossil_free_fuel_share,
        }
    }

    /// Value of a boolean attribute, if set on the query.
    pub fn flag(&self, field: FlagField) -> Option<bool> {
        match field {
            FlagField::WasteCertificate => self.environmental.waste_certificate,
            FlagField::UseOps => self.call_context.use_ops,
            FlagField::InlandWaterway => self.call_context.is_inland_waterway,
            FlagField::ShortSeaShipping => self.call_context.is_short_sea_shipping,
        }
    }
}
