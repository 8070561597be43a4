use super::{Result, TimingsError};
use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

pub const SORTED_HEADER: [&str; 4] = [
    "ФИО пассажира",
    "Номер каюты",
    "Тип каюты",
    "Порт назначения",
];

/// A passenger record as sorted by the benchmark.
/// Passengers are ordered by cabin number, then destination port, then full name;
/// the cabin type does not take part in the comparison.
#[derive(Debug, Clone)]
pub struct Passenger {
    pub full_name: String,
    pub cabin_number: i32,
    pub cabin_type: String,
    pub destination_port: String,
}

impl Ord for Passenger {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cabin_number
            .cmp(&other.cabin_number)
            .then_with(|| self.destination_port.cmp(&other.destination_port))
            .then_with(|| self.full_name.cmp(&other.full_name))
    }
}

impl PartialOrd for Passenger {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Passenger {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Passenger {}

/// Reads the passengers from csv, skipping the header line.
/// Columns are: full name, cabin number, cabin type, destination port.
pub fn load_passengers<P: AsRef<Path>>(fin: P) -> Result<Vec<Passenger>> {
    let fin = fin.as_ref();
    let file = File::open(fin).map_err(|e| TimingsError::io(fin, e))?;
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(BufReader::new(file));
    let mut passengers = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let field = |i: usize| record.get(i).unwrap_or_default().to_string();
        let cabin = field(1);
        let cabin_number = cabin
            .trim()
            .parse::<i32>()
            .map_err(|_| TimingsError::InvalidField {
                field: "cabin number",
                value: cabin.clone(),
                line,
            })?;
        passengers.push(Passenger {
            full_name: field(0),
            cabin_number,
            cabin_type: field(2),
            destination_port: field(3),
        });
    }
    if passengers.is_empty() {
        return Err(TimingsError::NoPassengers(fin.to_path_buf()));
    }
    info!("loaded {} passengers from {}", passengers.len(), fin.display());
    Ok(passengers)
}

/// Writes the passengers as csv at the given path, with the localized header.
pub fn save_passengers<P: AsRef<Path>>(fout: P, passengers: &[Passenger]) -> Result<()> {
    let fout = fout.as_ref();
    let file = File::create(fout).map_err(|e| TimingsError::io(fout, e))?;
    let mut wtr = csv::Writer::from_writer(BufWriter::new(file));
    wtr.write_record(SORTED_HEADER)?;
    for p in passengers {
        let cabin_number = p.cabin_number.to_string();
        wtr.write_record([
            p.full_name.as_str(),
            cabin_number.as_str(),
            p.cabin_type.as_str(),
            p.destination_port.as_str(),
        ])?;
    }
    wtr.flush().map_err(|e| TimingsError::io(fout, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn passenger(name: &str, cabin: i32, port: &str) -> Passenger {
        Passenger {
            full_name: name.to_string(),
            cabin_number: cabin,
            cabin_type: "Люкс".to_string(),
            destination_port: port.to_string(),
        }
    }

    #[test]
    fn ordered_by_cabin_then_port_then_name() {
        let mut v = vec![
            passenger("Б", 2, "Одесса"),
            passenger("А", 2, "Одесса"),
            passenger("В", 1, "Ялта"),
            passenger("Г", 2, "Батуми"),
        ];
        v.sort();
        let names: Vec<&str> = v.iter().map(|p| p.full_name.as_str()).collect();
        assert_eq!(names, ["В", "Г", "А", "Б"]);
    }

    #[test]
    fn cabin_type_is_ignored_by_comparison() {
        let a = passenger("А", 1, "Ялта");
        let mut b = a.clone();
        b.cabin_type = "3".to_string();
        assert_eq!(a, b);
    }

    #[test]
    fn save_then_load_keeps_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("passengers.csv");
        let v = vec![passenger("Иванов Иван", 12, "Сочи"), passenger("Smith, John", 3, "Батуми")];
        save_passengers(&path, &v).unwrap();
        let loaded = load_passengers(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].full_name, "Smith, John");
        assert_eq!(loaded[0].cabin_number, 12);
        assert_eq!(loaded[0].cabin_type, "Люкс");
    }

    #[test]
    fn bad_cabin_number_names_the_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("passengers.csv");
        let mut f = File::create(&path).unwrap();
        f.write_all("name,cabin,type,port\nА,1,2,Сочи\nБ,x,2,Сочи\n".as_bytes())
            .unwrap();
        match load_passengers(&path) {
            Err(TimingsError::InvalidField { value, line, .. }) => {
                assert_eq!(value, "x");
                assert_eq!(line, 3);
            }
            other => panic!("expected an invalid field, got {:?}", other),
        }
    }

    #[test]
    fn header_only_file_has_no_passengers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("passengers.csv");
        std::fs::write(&path, "name,cabin,type,port\n").unwrap();
        assert!(matches!(
            load_passengers(&path),
            Err(TimingsError::NoPassengers(_))
        ));
    }
}
