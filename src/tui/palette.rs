use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::LineRecord;

/// Categorical colors for language/file-type labels, assigned in
/// first-encounter order over the commit-sorted record set.
const TYPE_COLORS: [Color; 8] = [
    Color::Rgb(96, 165, 250),
    Color::Rgb(244, 114, 182),
    Color::Rgb(52, 211, 153),
    Color::Rgb(251, 191, 36),
    Color::Rgb(167, 139, 250),
    Color::Rgb(251, 146, 60),
    Color::Rgb(45, 212, 191),
    Color::Rgb(248, 113, 113),
];

/// Stable mapping from a record's `type` label to a display color.
///
/// Built once per load, so the same label always renders the same color in
/// every view and across re-renders.
pub struct TypePalette {
    index: HashMap<String, usize>,
}

impl TypePalette {
    pub fn build<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a LineRecord>,
    {
        let mut index = HashMap::new();
        for record in records {
            let next = index.len();
            index.entry(record.kind.clone()).or_insert(next);
        }
        Self { index }
    }

    pub fn color_for(&self, kind: &str) -> Color {
        match self.index.get(kind) {
            Some(&i) => TYPE_COLORS[i % TYPE_COLORS.len()],
            None => Color::Gray,
        }
    }
}

/// Hour-of-day color ramp for the scatterplot background: night blue through
/// midday yellow into evening orange.
pub fn hour_color(hour: f64) -> Color {
    const NIGHT: (u8, u8, u8) = (59, 130, 246);
    const NOON: (u8, u8, u8) = (250, 204, 21);
    const EVENING: (u8, u8, u8) = (251, 146, 60);

    let hour = hour.clamp(0.0, 24.0);
    if hour <= 12.0 {
        lerp(NIGHT, NOON, hour / 12.0)
    } else {
        lerp(NOON, EVENING, (hour - 12.0) / 12.0)
    }
}

fn lerp(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let channel = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    Color::Rgb(channel(a.0, b.0), channel(a.1, b.1), channel(a.2, b.2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_records;

    #[test]
    fn same_label_always_maps_to_the_same_color() {
        let input = "commit,file,line,depth,length,type,author,date,time,timezone,datetime\n\
                     a,x.js,1,0,1,js,ada,2024-01-01,10:00,+00:00,2024-01-01T10:00\n\
                     a,y.css,1,0,1,css,ada,2024-01-01,10:00,+00:00,2024-01-01T10:00\n\
                     b,z.js,1,0,1,js,ada,2024-01-02,10:00,+00:00,2024-01-02T10:00\n";
        let records = parse_records(input).unwrap();
        let palette = TypePalette::build(&records);
        assert_eq!(palette.color_for("js"), TYPE_COLORS[0]);
        assert_eq!(palette.color_for("css"), TYPE_COLORS[1]);
        let again = TypePalette::build(&records);
        assert_eq!(again.color_for("js"), palette.color_for("js"));
        assert_eq!(palette.color_for("unknown"), Color::Gray);
    }

    #[test]
    fn hour_ramp_hits_its_anchors() {
        assert_eq!(hour_color(0.0), Color::Rgb(59, 130, 246));
        assert_eq!(hour_color(12.0), Color::Rgb(250, 204, 21));
        assert_eq!(hour_color(24.0), Color::Rgb(251, 146, 60));
    }
}
