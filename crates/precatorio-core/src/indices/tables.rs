//! Embedded monthly index datasets.
//!
//! Three regimes of monetary correction, each backed by its own table:
//!
//! - `legacy_factor`: multiplicative correction factors (index levels) for
//!   the pre-EC113 regime, 2000-01 through 2021-12. The November 2021 factor
//!   is the ceiling every legacy correction is brought up to.
//! - `selic_monthly`: SELIC monthly percentages, 2022-01 through 2024-12.
//! - `ipca_e_monthly`: IPCA-E monthly percentages from 2025-01 on, plus a
//!   supplement table holding provisional months not yet consolidated into
//!   the main series.
//!
//! Tables are plain data bundled behind [`IndexTables::brazil`] and passed by
//! reference into the resolver and engines. Out-of-range months resolve to
//! zero contribution, never a panic: the tables are authoritative but may
//! lag the calendar.
//!
//! Finalized settlements are persisted snapshots, so revising a table in a
//! later release never rewrites an already-closed case.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::YearMonth;

/// An ordered, immutable mapping from month to a table value (a percentage
/// or a factor, depending on the table).
#[derive(Debug, Clone, Default)]
pub struct MonthlyIndexTable {
    entries: BTreeMap<YearMonth, Decimal>,
}

impl MonthlyIndexTable {
    pub fn from_rows(rows: &[(i32, u32, Decimal)]) -> Self {
        let entries = rows
            .iter()
            .map(|&(year, month, value)| (YearMonth::of(year, month), value))
            .collect();
        MonthlyIndexTable { entries }
    }

    pub fn get(&self, ym: YearMonth) -> Option<Decimal> {
        self.entries.get(&ym).copied()
    }

    pub fn first_month(&self) -> Option<YearMonth> {
        self.entries.keys().next().copied()
    }

    pub fn last_month(&self) -> Option<YearMonth> {
        self.entries.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The full set of index tables the calculator runs against.
///
/// Constructed once (usually via [`IndexTables::brazil`]) and borrowed by
/// every computation, so the engines stay pure functions of their inputs.
#[derive(Debug, Clone)]
pub struct IndexTables {
    pub legacy_factor: MonthlyIndexTable,
    pub selic_monthly: MonthlyIndexTable,
    pub ipca_e_monthly: MonthlyIndexTable,
    pub ipca_e_supplement: MonthlyIndexTable,
}

impl IndexTables {
    /// The embedded Brazilian dataset.
    pub fn brazil() -> Self {
        IndexTables {
            legacy_factor: MonthlyIndexTable::from_rows(LEGACY_FACTOR_ROWS),
            selic_monthly: MonthlyIndexTable::from_rows(SELIC_MONTHLY_ROWS),
            ipca_e_monthly: MonthlyIndexTable::from_rows(IPCA_E_MONTHLY_ROWS),
            ipca_e_supplement: MonthlyIndexTable::from_rows(IPCA_E_SUPPLEMENT_ROWS),
        }
    }

    /// Assemble tables from caller-provided rows. Unit tests and hosts with
    /// their own index feeds use this instead of the embedded data.
    pub fn from_parts(
        legacy_factor: MonthlyIndexTable,
        selic_monthly: MonthlyIndexTable,
        ipca_e_monthly: MonthlyIndexTable,
        ipca_e_supplement: MonthlyIndexTable,
    ) -> Self {
        IndexTables {
            legacy_factor,
            selic_monthly,
            ipca_e_monthly,
            ipca_e_supplement,
        }
    }
}

/// SELIC monthly percentages, EC113 window (2022-01 through 2024-12).
const SELIC_MONTHLY_ROWS: &[(i32, u32, Decimal)] = &[
    (2022, 1, dec!(0.73)),
    (2022, 2, dec!(0.76)),
    (2022, 3, dec!(0.93)),
    (2022, 4, dec!(0.83)),
    (2022, 5, dec!(1.03)),
    (2022, 6, dec!(1.02)),
    (2022, 7, dec!(1.03)),
    (2022, 8, dec!(1.17)),
    (2022, 9, dec!(1.07)),
    (2022, 10, dec!(1.02)),
    (2022, 11, dec!(1.02)),
    (2022, 12, dec!(1.12)),
    (2023, 1, dec!(1.12)),
    (2023, 2, dec!(0.92)),
    (2023, 3, dec!(1.17)),
    (2023, 4, dec!(0.92)),
    (2023, 5, dec!(1.12)),
    (2023, 6, dec!(1.07)),
    (2023, 7, dec!(1.07)),
    (2023, 8, dec!(1.14)),
    (2023, 9, dec!(0.97)),
    (2023, 10, dec!(1.00)),
    (2023, 11, dec!(0.92)),
    (2023, 12, dec!(0.89)),
    (2024, 1, dec!(0.97)),
    (2024, 2, dec!(0.80)),
    (2024, 3, dec!(0.83)),
    (2024, 4, dec!(0.89)),
    (2024, 5, dec!(0.83)),
    (2024, 6, dec!(0.79)),
    (2024, 7, dec!(0.91)),
    (2024, 8, dec!(0.87)),
    (2024, 9, dec!(0.84)),
    (2024, 10, dec!(0.93)),
    (2024, 11, dec!(0.79)),
    (2024, 12, dec!(0.93)),
];

/// IPCA-E monthly percentages, consolidated series from 2025-01.
const IPCA_E_MONTHLY_ROWS: &[(i32, u32, Decimal)] = &[
    (2025, 1, dec!(0.11)),
    (2025, 2, dec!(1.23)),
    (2025, 3, dec!(0.64)),
    (2025, 4, dec!(0.43)),
    (2025, 5, dec!(0.36)),
    (2025, 6, dec!(0.26)),
    (2025, 7, dec!(0.33)),
    (2025, 8, dec!(0.14)),
    (2025, 9, dec!(0.48)),
    (2025, 10, dec!(0.19)),
    (2025, 11, dec!(0.28)),
    (2025, 12, dec!(0.34)),
    (2026, 1, dec!(0.42)),
    (2026, 2, dec!(0.81)),
    (2026, 3, dec!(0.51)),
    (2026, 4, dec!(0.39)),
    (2026, 5, dec!(0.27)),
    (2026, 6, dec!(0.24)),
];

/// Provisional months published ahead of the consolidated IPCA-E series.
/// Consulted only when a month is absent from `ipca_e_monthly`.
const IPCA_E_SUPPLEMENT_ROWS: &[(i32, u32, Decimal)] = &[
    (2026, 7, dec!(0.31)),
    (2026, 8, dec!(0.22)),
];

/// Legacy correction factors (index levels), 2000-01 through 2021-12.
/// Ratios of consecutive entries carry the implied monthly variation used
/// for the legacy interest sum.
const LEGACY_FACTOR_ROWS: &[(i32, u32, Decimal)] = &[
    (2000, 1, dec!(1.000000)),
    (2000, 2, dec!(1.003100)),
    (2000, 3, dec!(1.007474)),
    (2000, 4, dec!(1.011390)),
    (2000, 5, dec!(1.017485)),
    (2000, 6, dec!(1.023040)),
    (2000, 7, dec!(1.029438)),
    (2000, 8, dec!(1.034288)),
    (2000, 9, dec!(1.035416)),
    (2000, 10, dec!(1.041443)),
    (2000, 11, dec!(1.048397)),
    (2000, 12, dec!(1.053618)),
    (2001, 1, dec!(1.057189)),
    (2001, 2, dec!(1.060964)),
    (2001, 3, dec!(1.065248)),
    (2001, 4, dec!(1.072816)),
    (2001, 5, dec!(1.083128)),
    (2001, 6, dec!(1.086724)),
    (2001, 7, dec!(1.091974)),
    (2001, 8, dec!(1.101362)),
    (2001, 9, dec!(1.110507)),
    (2001, 10, dec!(1.116113)),
    (2001, 11, dec!(1.126079)),
    (2001, 12, dec!(1.134431)),
    (2002, 1, dec!(1.147494)),
    (2002, 2, dec!(1.162370)),
    (2002, 3, dec!(1.175971)),
    (2002, 4, dec!(1.185659)),
    (2002, 5, dec!(1.194735)),
    (2002, 6, dec!(1.207394)),
    (2002, 7, dec!(1.218365)),
    (2002, 8, dec!(1.226127)),
    (2002, 9, dec!(1.239928)),
    (2002, 10, dec!(1.255575)),
    (2002, 11, dec!(1.264874)),
    (2002, 12, dec!(1.276576)),
    (2003, 1, dec!(1.289116)),
    (2003, 2, dec!(1.298163)),
    (2003, 3, dec!(1.311351)),
    (2003, 4, dec!(1.323994)),
    (2003, 5, dec!(1.335152)),
    (2003, 6, dec!(1.344143)),
    (2003, 7, dec!(1.356116)),
    (2003, 8, dec!(1.364890)),
    (2003, 9, dec!(1.370811)),
    (2003, 10, dec!(1.377066)),
    (2003, 11, dec!(1.385896)),
    (2003, 12, dec!(1.395297)),
    (2004, 1, dec!(1.397794)),
    (2004, 2, dec!(1.409435)),
    (2004, 3, dec!(1.421557)),
    (2004, 4, dec!(1.433513)),
    (2004, 5, dec!(1.445041)),
    (2004, 6, dec!(1.455566)),
    (2004, 7, dec!(1.467715)),
    (2004, 8, dec!(1.476044)),
    (2004, 9, dec!(1.479947)),
    (2004, 10, dec!(1.492341)),
    (2004, 11, dec!(1.498364)),
    (2004, 12, dec!(1.501339)),
    (2005, 1, dec!(1.511783)),
    (2005, 2, dec!(1.521270)),
    (2005, 3, dec!(1.526596)),
    (2005, 4, dec!(1.530539)),
    (2005, 5, dec!(1.540905)),
    (2005, 6, dec!(1.546400)),
    (2005, 7, dec!(1.548843)),
    (2005, 8, dec!(1.560618)),
    (2005, 9, dec!(1.565839)),
    (2005, 10, dec!(1.574024)),
    (2005, 11, dec!(1.577210)),
    (2005, 12, dec!(1.586763)),
    (2006, 1, dec!(1.589794)),
    (2006, 2, dec!(1.597493)),
    (2006, 3, dec!(1.600299)),
    (2006, 4, dec!(1.608520)),
    (2006, 5, dec!(1.609723)),
    (2006, 6, dec!(1.616554)),
    (2006, 7, dec!(1.618221)),
    (2006, 8, dec!(1.622432)),
    (2006, 9, dec!(1.630102)),
    (2006, 10, dec!(1.630599)),
    (2006, 11, dec!(1.630715)),
    (2006, 12, dec!(1.636588)),
    (2007, 1, dec!(1.641062)),
    (2007, 2, dec!(1.643278)),
    (2007, 3, dec!(1.651476)),
    (2007, 4, dec!(1.655360)),
    (2007, 5, dec!(1.657491)),
    (2007, 6, dec!(1.657274)),
    (2007, 7, dec!(1.666715)),
    (2007, 8, dec!(1.673365)),
    (2007, 9, dec!(1.683250)),
    (2007, 10, dec!(1.693115)),
    (2007, 11, dec!(1.699940)),
    (2007, 12, dec!(1.709578)),
    (2008, 1, dec!(1.721559)),
    (2008, 2, dec!(1.725850)),
    (2008, 3, dec!(1.731724)),
    (2008, 4, dec!(1.744006)),
    (2008, 5, dec!(1.752214)),
    (2008, 6, dec!(1.761237)),
    (2008, 7, dec!(1.770548)),
    (2008, 8, dec!(1.779742)),
    (2008, 9, dec!(1.788709)),
    (2008, 10, dec!(1.792417)),
    (2008, 11, dec!(1.797987)),
    (2008, 12, dec!(1.810442)),
    (2009, 1, dec!(1.818077)),
    (2009, 2, dec!(1.819181)),
    (2009, 3, dec!(1.820259)),
    (2009, 4, dec!(1.832433)),
    (2009, 5, dec!(1.838588)),
    (2009, 6, dec!(1.849125)),
    (2009, 7, dec!(1.855172)),
    (2009, 8, dec!(1.857551)),
    (2009, 9, dec!(1.861585)),
    (2009, 10, dec!(1.873149)),
    (2009, 11, dec!(1.883382)),
    (2009, 12, dec!(1.888473)),
    (2010, 1, dec!(1.898540)),
    (2010, 2, dec!(1.905163)),
    (2010, 3, dec!(1.909820)),
    (2010, 4, dec!(1.921817)),
    (2010, 5, dec!(1.928910)),
    (2010, 6, dec!(1.933738)),
    (2010, 7, dec!(1.938660)),
    (2010, 8, dec!(1.955245)),
    (2010, 9, dec!(1.971038)),
    (2010, 10, dec!(1.976093)),
    (2010, 11, dec!(1.992701)),
    (2010, 12, dec!(2.000082)),
    (2011, 1, dec!(2.006519)),
    (2011, 2, dec!(2.017205)),
    (2011, 3, dec!(2.022982)),
    (2011, 4, dec!(2.036642)),
    (2011, 5, dec!(2.052442)),
    (2011, 6, dec!(2.058308)),
    (2011, 7, dec!(2.063434)),
    (2011, 8, dec!(2.076350)),
    (2011, 9, dec!(2.092944)),
    (2011, 10, dec!(2.104685)),
    (2011, 11, dec!(2.112883)),
    (2011, 12, dec!(2.130088)),
    (2012, 1, dec!(2.138428)),
    (2012, 2, dec!(2.146198)),
    (2012, 3, dec!(2.150052)),
    (2012, 4, dec!(2.163172)),
    (2012, 5, dec!(2.169027)),
    (2012, 6, dec!(2.174191)),
    (2012, 7, dec!(2.190526)),
    (2012, 8, dec!(2.193644)),
    (2012, 9, dec!(2.208967)),
    (2012, 10, dec!(2.225589)),
    (2012, 11, dec!(2.239527)),
    (2012, 12, dec!(2.254486)),
    (2013, 1, dec!(2.260172)),
    (2013, 2, dec!(2.276051)),
    (2013, 3, dec!(2.280980)),
    (2013, 4, dec!(2.288257)),
    (2013, 5, dec!(2.301745)),
    (2013, 6, dec!(2.313610)),
    (2013, 7, dec!(2.319605)),
    (2013, 8, dec!(2.328847)),
    (2013, 9, dec!(2.341492)),
    (2013, 10, dec!(2.361177)),
    (2013, 11, dec!(2.369923)),
    (2013, 12, dec!(2.387728)),
    (2014, 1, dec!(2.394909)),
    (2014, 2, dec!(2.412712)),
    (2014, 3, dec!(2.420420)),
    (2014, 4, dec!(2.430658)),
    (2014, 5, dec!(2.450786)),
    (2014, 6, dec!(2.460228)),
    (2014, 7, dec!(2.472432)),
    (2014, 8, dec!(2.483179)),
    (2014, 9, dec!(2.506238)),
    (2014, 10, dec!(2.515945)),
    (2014, 11, dec!(2.525254)),
    (2014, 12, dec!(2.540781)),
    (2015, 1, dec!(2.564755)),
    (2015, 2, dec!(2.583377)),
    (2015, 3, dec!(2.599257)),
    (2015, 4, dec!(2.624657)),
    (2015, 5, dec!(2.649044)),
    (2015, 6, dec!(2.676106)),
    (2015, 7, dec!(2.704524)),
    (2015, 8, dec!(2.718623)),
    (2015, 9, dec!(2.744193)),
    (2015, 10, dec!(2.763949)),
    (2015, 11, dec!(2.782097)),
    (2015, 12, dec!(2.811883)),
    (2016, 1, dec!(2.834722)),
    (2016, 2, dec!(2.844611)),
    (2016, 3, dec!(2.854995)),
    (2016, 4, dec!(2.873994)),
    (2016, 5, dec!(2.880737)),
    (2016, 6, dec!(2.899976)),
    (2016, 7, dec!(2.926247)),
    (2016, 8, dec!(2.935113)),
    (2016, 9, dec!(2.944713)),
    (2016, 10, dec!(2.960372)),
    (2016, 11, dec!(2.967235)),
    (2016, 12, dec!(2.988750)),
    (2017, 1, dec!(2.994281)),
    (2017, 2, dec!(3.002912)),
    (2017, 3, dec!(3.011588)),
    (2017, 4, dec!(3.022535)),
    (2017, 5, dec!(3.025302)),
    (2017, 6, dec!(3.030174)),
    (2017, 7, dec!(3.042490)),
    (2017, 8, dec!(3.052120)),
    (2017, 9, dec!(3.054896)),
    (2017, 10, dec!(3.059299)),
    (2017, 11, dec!(3.070749)),
    (2017, 12, dec!(3.076916)),
    (2018, 1, dec!(3.089990)),
    (2018, 2, dec!(3.103507)),
    (2018, 3, dec!(3.104170)),
    (2018, 4, dec!(3.113471)),
    (2018, 5, dec!(3.120900)),
    (2018, 6, dec!(3.127858)),
    (2018, 7, dec!(3.140638)),
    (2018, 8, dec!(3.146526)),
    (2018, 9, dec!(3.149481)),
    (2018, 10, dec!(3.166788)),
    (2018, 11, dec!(3.181232)),
    (2018, 12, dec!(3.192300)),
    (2019, 1, dec!(3.207270)),
    (2019, 2, dec!(3.227938)),
    (2019, 3, dec!(3.229490)),
    (2019, 4, dec!(3.233905)),
    (2019, 5, dec!(3.246018)),
    (2019, 6, dec!(3.257456)),
    (2019, 7, dec!(3.273864)),
    (2019, 8, dec!(3.290161)),
    (2019, 9, dec!(3.298110)),
    (2019, 10, dec!(3.305406)),
    (2019, 11, dec!(3.312556)),
    (2019, 12, dec!(3.329888)),
    (2020, 1, dec!(3.345288)),
    (2020, 2, dec!(3.365477)),
    (2020, 3, dec!(3.372374)),
    (2020, 4, dec!(3.378582)),
    (2020, 5, dec!(3.390822)),
    (2020, 6, dec!(3.408118)),
    (2020, 7, dec!(3.420995)),
    (2020, 8, dec!(3.432025)),
    (2020, 9, dec!(3.449090)),
    (2020, 10, dec!(3.466053)),
    (2020, 11, dec!(3.463693)),
    (2020, 12, dec!(3.480398)),
    (2021, 1, dec!(3.515500)),
    (2021, 2, dec!(3.548635)),
    (2021, 3, dec!(3.579778)),
    (2021, 4, dec!(3.604969)),
    (2021, 5, dec!(3.638254)),
    (2021, 6, dec!(3.655947)),
    (2021, 7, dec!(3.677041)),
    (2021, 8, dec!(3.711162)),
    (2021, 9, dec!(3.731961)),
    (2021, 10, dec!(3.774298)),
    (2021, 11, dec!(3.795610)),
    (2021, 12, dec!(3.830525)),
];
