use std::io::Write;

use prettytable::{format, Cell, Row, Table};

use crate::group::Group;
use crate::load::{Metric, Record, MODE_COLUMN};
use crate::Result;

fn avg(recs: &[Record], metric: Metric) -> Option<f64> {
    let vals: Vec<f64> = recs.iter().map(|r| r.value(metric)).filter(|v| v.is_finite()).collect();
    if vals.is_empty() {
        None
    } else {
        Some(vals.iter().sum::<f64>() / vals.len() as f64)
    }
}

/// Per mode: rows seen, rows plotted, and the mean of each metric over the plotted rows.
pub fn summary_table(groups: &[Group], sample_size: usize) -> Table {
    let mut celltable = Table::new();
    celltable.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    {
        let mut vcell = vec![Cell::new(&format!("k:{}", MODE_COLUMN)), Cell::new("count"), Cell::new("sampled")];
        for m in Metric::ALL {
            vcell.push(Cell::new(&format!("avg:{}", m.column())));
        }
        celltable.set_titles(Row::new(vcell));
    }
    for g in groups {
        let sample = g.sample(sample_size);
        let mut vcell = vec![
            Cell::new(&g.mode),
            Cell::new(&g.records.len().to_string()),
            Cell::new(&sample.len().to_string()),
        ];
        for m in Metric::ALL {
            match avg(sample, m) {
                Some(v) => vcell.push(Cell::new(&format!("{:.3}", v))),
                None => vcell.push(Cell::new("unknown")),
            }
        }
        celltable.add_row(Row::new(vcell));
    }
    celltable
}

pub fn write_summary<W: Write>(groups: &[Group], sample_size: usize, writer: &mut W) -> Result<()> {
    summary_table(groups, sample_size).print(writer)?;
    writer.flush()?;
    Ok(())
}
