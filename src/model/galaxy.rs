//! Galaxy catalog records and their table columns

use super::column::{CellValue, ColumnDef, ColumnOptions};
use super::format::{fixed, fixed_if_present, log10_if_present};
use serde::{Deserialize, Serialize};

/// One galaxy catalog row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalaxyRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub alt_name: Option<String>,
    pub ra: f64,
    pub dec: f64,
    #[serde(default)]
    pub distmpc: Option<f64>,
    #[serde(default)]
    pub distmpc_unc: Option<f64>,
    #[serde(default)]
    pub redshift: Option<f64>,
    #[serde(default)]
    pub redshift_error: Option<f64>,
    #[serde(default)]
    pub sfr_fuv: Option<f64>,
    /// Stellar mass in solar masses, displayed as log10
    #[serde(default)]
    pub mstar: Option<f64>,
    #[serde(default)]
    pub magb: Option<f64>,
    #[serde(default)]
    pub magk: Option<f64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Raw value accessors
// ─────────────────────────────────────────────────────────────────────────────

fn name(g: &GalaxyRecord) -> CellValue<'_> {
    CellValue::Text(g.name.as_deref())
}

fn alt_name(g: &GalaxyRecord) -> CellValue<'_> {
    CellValue::Text(g.alt_name.as_deref())
}

fn ra(g: &GalaxyRecord) -> CellValue<'_> {
    CellValue::Number(Some(g.ra))
}

fn dec(g: &GalaxyRecord) -> CellValue<'_> {
    CellValue::Number(Some(g.dec))
}

fn distmpc(g: &GalaxyRecord) -> CellValue<'_> {
    CellValue::Number(g.distmpc)
}

fn distmpc_unc(g: &GalaxyRecord) -> CellValue<'_> {
    CellValue::Number(g.distmpc_unc)
}

fn redshift(g: &GalaxyRecord) -> CellValue<'_> {
    CellValue::Number(g.redshift)
}

fn redshift_error(g: &GalaxyRecord) -> CellValue<'_> {
    CellValue::Number(g.redshift_error)
}

fn sfr_fuv(g: &GalaxyRecord) -> CellValue<'_> {
    CellValue::Number(g.sfr_fuv)
}

fn mstar(g: &GalaxyRecord) -> CellValue<'_> {
    CellValue::Number(g.mstar)
}

fn magb(g: &GalaxyRecord) -> CellValue<'_> {
    CellValue::Number(g.magb)
}

fn magk(g: &GalaxyRecord) -> CellValue<'_> {
    CellValue::Number(g.magk)
}

// ─────────────────────────────────────────────────────────────────────────────
// Body renderers
// ─────────────────────────────────────────────────────────────────────────────

fn render_ra(g: &GalaxyRecord) -> String {
    fixed(g.ra, 6)
}

fn render_dec(g: &GalaxyRecord) -> String {
    fixed(g.dec, 6)
}

fn render_distance(g: &GalaxyRecord) -> String {
    fixed_if_present(g.distmpc, 2)
}

fn render_distance_uncertainty(g: &GalaxyRecord) -> String {
    fixed_if_present(g.distmpc_unc, 6)
}

fn render_redshift(g: &GalaxyRecord) -> String {
    fixed_if_present(g.redshift, 6)
}

fn render_redshift_error(g: &GalaxyRecord) -> String {
    fixed_if_present(g.redshift_error, 6)
}

fn render_sfr(g: &GalaxyRecord) -> String {
    fixed_if_present(g.sfr_fuv, 6)
}

fn render_mstar(g: &GalaxyRecord) -> String {
    log10_if_present(g.mstar, 2)
}

fn render_magb(g: &GalaxyRecord) -> String {
    fixed_if_present(g.magb, 2)
}

fn render_magk(g: &GalaxyRecord) -> String {
    fixed_if_present(g.magk, 2)
}

/// The galaxy table's columns, in display order
pub static GALAXY_COLUMNS: [ColumnDef<GalaxyRecord>; 12] = [
    ColumnDef::plain("name", "Galaxy Name", name),
    ColumnDef::plain("alt_name", "Alternative Galaxy Name", alt_name),
    ColumnDef::rendered("ra", "Right Ascension", ColumnOptions::NUMERIC, ra, render_ra),
    ColumnDef::rendered("dec", "Declination", ColumnOptions::NUMERIC, dec, render_dec),
    ColumnDef::rendered(
        "distmpc",
        "Distance [mpc]",
        ColumnOptions::NUMERIC,
        distmpc,
        render_distance,
    ),
    ColumnDef::rendered(
        "distmpc_unc",
        "Distance uncertainty [mpc]",
        ColumnOptions::NUMERIC,
        distmpc_unc,
        render_distance_uncertainty,
    ),
    ColumnDef::rendered(
        "redshift",
        "Redshift",
        ColumnOptions::NUMERIC,
        redshift,
        render_redshift,
    ),
    ColumnDef::rendered(
        "redshift_error",
        "Redshift error",
        ColumnOptions::NUMERIC,
        redshift_error,
        render_redshift_error,
    ),
    ColumnDef::rendered(
        "sfr_fuv",
        "SFR based on FUV [Msol/yr]",
        ColumnOptions::NUMERIC,
        sfr_fuv,
        render_sfr,
    ),
    ColumnDef::rendered(
        "mstar",
        "log10 (Stellar mass [Msol])",
        ColumnOptions::NUMERIC,
        mstar,
        render_mstar,
    ),
    ColumnDef::rendered(
        "magb",
        "B band magnitude [mag]",
        ColumnOptions::NUMERIC,
        magb,
        render_magb,
    ),
    ColumnDef::rendered(
        "magk",
        "K band magnitude [mag]",
        ColumnOptions::NUMERIC,
        magk,
        render_magk,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str) -> &'static ColumnDef<GalaxyRecord> {
        GALAXY_COLUMNS
            .iter()
            .find(|c| c.name == name)
            .expect("column exists")
    }

    fn sample() -> GalaxyRecord {
        GalaxyRecord {
            name: Some("NGC 4993".to_string()),
            alt_name: Some("ESO 508-18".to_string()),
            ra: 197.448776,
            dec: -23.383831,
            distmpc: Some(40.4),
            distmpc_unc: Some(2.6),
            redshift: Some(0.009727),
            redshift_error: None,
            sfr_fuv: Some(0.0),
            mstar: Some(1.0e11),
            magb: Some(13.32),
            magk: None,
        }
    }

    #[test]
    fn test_column_order_is_fixed() {
        let names: Vec<&str> = GALAXY_COLUMNS.iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                "name",
                "alt_name",
                "ra",
                "dec",
                "distmpc",
                "distmpc_unc",
                "redshift",
                "redshift_error",
                "sfr_fuv",
                "mstar",
                "magb",
                "magk",
            ]
        );
    }

    #[test]
    fn test_name_columns_are_pass_through() {
        let g = sample();
        assert_eq!(column("name").display(&g), "NGC 4993");
        assert_eq!(column("alt_name").display(&g), "ESO 508-18");
        assert!(column("name").render.is_none());
        assert!(column("name").options.filter);
        assert!(!column("name").options.sort_third_click_reset);
    }

    #[test]
    fn test_numeric_columns_are_sortable_and_not_filterable() {
        for c in GALAXY_COLUMNS.iter().skip(2) {
            assert!(!c.options.filter, "{} should not be filterable", c.name);
            assert!(c.options.sort, "{} should be sortable", c.name);
            assert!(c.options.sort_third_click_reset, "{} should reset", c.name);
            assert!(c.render.is_some(), "{} should have a renderer", c.name);
        }
    }

    #[test]
    fn test_coordinates_always_shown_with_six_places() {
        let mut g = sample();
        g.ra = 10.123456789;
        g.dec = 0.0;
        assert_eq!(column("ra").display(&g), "10.123457");
        assert_eq!(column("dec").display(&g), "0.000000");
    }

    #[test]
    fn test_distance_and_magnitudes_use_two_places() {
        let mut g = sample();
        g.distmpc = Some(42.5);
        assert_eq!(column("distmpc").display(&g), "42.50");
        assert_eq!(column("magb").display(&g), "13.32");
        assert_eq!(column("magk").display(&g), "");

        g.distmpc = Some(0.0);
        assert_eq!(column("distmpc").display(&g), "");
        g.distmpc = None;
        assert_eq!(column("distmpc").display(&g), "");
    }

    #[test]
    fn test_six_place_optional_columns() {
        let g = sample();
        assert_eq!(column("distmpc_unc").display(&g), "2.600000");
        assert_eq!(column("redshift").display(&g), "0.009727");
        assert_eq!(column("redshift_error").display(&g), "");
        assert_eq!(column("sfr_fuv").display(&g), "");
    }

    #[test]
    fn test_mstar_shown_as_log10() {
        let mut g = sample();
        g.mstar = Some(1000.0);
        assert_eq!(column("mstar").display(&g), "3.00");
        g.mstar = Some(0.0);
        assert_eq!(column("mstar").display(&g), "");
        g.mstar = None;
        assert_eq!(column("mstar").display(&g), "");
    }

    #[test]
    fn test_deserialize_with_missing_optional_fields() {
        let json = r#"{"name": "M31", "ra": 10.684708, "dec": 41.26875, "magb": 4.36}"#;
        let g: GalaxyRecord = serde_json::from_str(json).expect("valid record");
        assert_eq!(g.name.as_deref(), Some("M31"));
        assert_eq!(g.alt_name, None);
        assert_eq!(g.magb, Some(4.36));
        assert_eq!(g.mstar, None);
    }

    #[test]
    fn test_deserialize_requires_coordinates() {
        let json = r#"{"name": "M31", "dec": 41.26875}"#;
        assert!(serde_json::from_str::<GalaxyRecord>(json).is_err());
    }
}
