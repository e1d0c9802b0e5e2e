//! Comma-separated star catalogue reader

use anyhow::{bail, Context};
use std::collections::HashMap;
use std::io::BufRead;

/// Star columns read from a CSV file, owned.
#[derive(Debug, Default)]
pub struct StarTable {
    pub campaign: Vec<i64>,
    pub ra: Vec<f64>,
    pub dec: Vec<f64>,
    pub jmag: Vec<f64>,
    pub hmag: Vec<f64>,
    pub kmag: Vec<f64>,
}

struct ColumnIndices {
    campaign: usize,
    ra: usize,
    dec: usize,
    jmag: usize,
    hmag: usize,
    kmag: usize,
}

impl StarTable {
    pub fn len(&self) -> usize {
        self.ra.len()
    }

    /// Read a header row followed by one star per line.
    ///
    /// Lines starting with `#` and blank lines are skipped. Empty or `nan`
    /// magnitude fields become NaN, which the selection treats as "not selected".
    pub fn read<R: BufRead>(reader: R) -> anyhow::Result<Self> {
        let mut lines = reader
            .lines()
            .enumerate()
            .filter(|(_, line)| match line {
                Ok(l) => !l.trim().is_empty() && !l.starts_with('#'),
                Err(_) => true,
            });

        let header = match lines.next() {
            Some((_, line)) => line?,
            None => bail!("EOF before finding header"),
        };
        let indices = build_column_indices(&header)?;

        let mut table = StarTable::default();
        for (line_num, line) in lines {
            let line = line?;
            let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
            table
                .push_row(&fields, &indices)
                .with_context(|| format!("line {}", line_num + 1))?;
        }
        Ok(table)
    }

    fn push_row(&mut self, fields: &[&str], indices: &ColumnIndices) -> anyhow::Result<()> {
        let field = |idx: usize, name: &str| {
            fields
                .get(idx)
                .copied()
                .ok_or_else(|| anyhow::anyhow!("missing value for column `{}`", name))
        };

        let campaign = field(indices.campaign, "campaign")?;
        self.campaign.push(
            campaign
                .parse()
                .with_context(|| format!("invalid campaign number `{}`", campaign))?,
        );
        self.ra.push(parse_coordinate(field(indices.ra, "ra")?, "ra")?);
        self.dec.push(parse_coordinate(field(indices.dec, "dec")?, "dec")?);
        self.jmag.push(parse_magnitude(field(indices.jmag, "jmag")?));
        self.hmag.push(parse_magnitude(field(indices.hmag, "hmag")?));
        self.kmag.push(parse_magnitude(field(indices.kmag, "kmag")?));
        Ok(())
    }
}

fn build_column_indices(header_line: &str) -> anyhow::Result<ColumnIndices> {
    let mut col_map: HashMap<String, usize> = HashMap::new();
    for (idx, col) in header_line.trim().split(',').enumerate() {
        col_map.insert(col.trim().to_ascii_lowercase(), idx);
    }
    let campaign = col_map
        .get("campaign")
        .or_else(|| col_map.get("cno"))
        .copied()
        .ok_or_else(|| anyhow::anyhow!("Missing column: campaign (or cno)"))?;
    Ok(ColumnIndices {
        campaign,
        ra: require_column(&col_map, "ra")?,
        dec: require_column(&col_map, "dec")?,
        jmag: require_column(&col_map, "jmag")?,
        hmag: require_column(&col_map, "hmag")?,
        kmag: require_column(&col_map, "kmag")?,
    })
}

fn require_column(col_map: &HashMap<String, usize>, name: &str) -> anyhow::Result<usize> {
    col_map
        .get(name)
        .copied()
        .ok_or_else(|| anyhow::anyhow!("Missing column: {}", name))
}

fn parse_coordinate(s: &str, name: &str) -> anyhow::Result<f64> {
    s.parse()
        .with_context(|| format!("invalid {} value `{}`", name, s))
}

fn parse_magnitude(s: &str) -> f64 {
    s.parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_with_alias_and_extra_columns() {
        let csv = "# K2 mock\nid,cno,ra,dec,jmag,hmag,kmag\n7,1,173.9,1.4,10.8,10.0,10.2\n\n8,5,130.1,16.8,11.0,,10.3\n";
        let table = StarTable::read(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.campaign, vec![1, 5]);
        assert_eq!(table.ra, vec![173.9, 130.1]);
        assert!(table.hmag[1].is_nan());
    }

    #[test]
    fn test_missing_column() {
        let csv = "campaign,ra,dec,jmag,kmag\n1,2,3,4,5\n";
        let err = StarTable::read(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("hmag"));
    }

    #[test]
    fn test_bad_campaign_reports_line() {
        let csv = "campaign,ra,dec,jmag,hmag,kmag\nC1,2,3,4,5,6\n";
        let err = StarTable::read(csv.as_bytes()).unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }
}
