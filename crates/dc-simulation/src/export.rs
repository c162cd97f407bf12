use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use dc_core::World;

use crate::error::SimResult;
use crate::record::{RunRecord, basic_headers, extended_headers};

/// File name of the basic table.
pub const BASIC_FILE: &str = "dungeon_crawl.csv";

/// File name of the extended table.
pub const EXTENDED_FILE: &str = "dungeon_crawl_extended.csv";

/// Writes run records to the basic and extended tables in a directory.
///
/// Rows are buffered; call [`flush`](Self::flush) before reading the files
/// back. Dropping the writer flushes on a best-effort basis.
#[derive(Debug)]
pub struct RecordWriter {
    basic: BufWriter<File>,
    extended: BufWriter<File>,
    dir: PathBuf,
    rows: usize,
}

impl RecordWriter {
    /// Truncate both tables in `dir` and write their header rows.
    pub fn create(dir: &Path, world: &World) -> SimResult<Self> {
        let basic = File::create(dir.join(BASIC_FILE))?;
        let extended = File::create(dir.join(EXTENDED_FILE))?;
        let mut writer = Self::from_files(dir, basic, extended);
        writer.write_headers(world, true, true)?;
        Ok(writer)
    }

    /// Open both tables in `dir` for appending, creating them if missing.
    ///
    /// Headers are written only into files that are empty.
    pub fn append_to(dir: &Path, world: &World) -> SimResult<Self> {
        let basic = open_append(&dir.join(BASIC_FILE))?;
        let extended = open_append(&dir.join(EXTENDED_FILE))?;
        let basic_empty = basic.metadata()?.len() == 0;
        let extended_empty = extended.metadata()?.len() == 0;
        let mut writer = Self::from_files(dir, basic, extended);
        writer.write_headers(world, basic_empty, extended_empty)?;
        Ok(writer)
    }

    fn from_files(dir: &Path, basic: File, extended: File) -> Self {
        Self {
            basic: BufWriter::new(basic),
            extended: BufWriter::new(extended),
            dir: dir.to_path_buf(),
            rows: 0,
        }
    }

    fn write_headers(&mut self, world: &World, basic: bool, extended: bool) -> SimResult<()> {
        if basic {
            write_row(&mut self.basic, &basic_headers(world))?;
        }
        if extended {
            write_row(&mut self.extended, &extended_headers(world))?;
        }
        Ok(())
    }

    /// Append one record to both tables.
    pub fn append(&mut self, record: &RunRecord) -> SimResult<()> {
        write_row(&mut self.basic, &record.basic_row())?;
        write_row(&mut self.extended, &record.extended_row())?;
        self.rows += 1;
        Ok(())
    }

    /// Rows appended through this writer.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Path of the basic table.
    pub fn basic_path(&self) -> PathBuf {
        self.dir.join(BASIC_FILE)
    }

    /// Path of the extended table.
    pub fn extended_path(&self) -> PathBuf {
        self.dir.join(EXTENDED_FILE)
    }

    /// Flush buffered rows to disk.
    pub fn flush(&mut self) -> SimResult<()> {
        self.basic.flush()?;
        self.extended.flush()?;
        Ok(())
    }
}

fn open_append(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn write_row<W: Write>(out: &mut W, cells: &[String]) -> std::io::Result<()> {
    let line: Vec<String> = cells.iter().map(|c| escape(c)).collect();
    writeln!(out, "{}", line.join(","))
}

/// Quote a cell if it contains a delimiter, a quote, or a line break.
fn escape(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::runner::run_dungeon;
    use dc_core::{Dungeon, Party};
    use dc_mechanics::ScriptedSource;

    fn world() -> World {
        World::standard().unwrap()
    }

    fn record(w: &World) -> RunRecord {
        let mut party =
            Party::from_roster(w, &[("Fighter", 2), ("Ranger", 2), ("Mage", 2), ("Cleric", 2)]).unwrap();
        let mut dungeon = Dungeon::scripted(w, &["Goblins", "Riddle Door"]).unwrap();
        run_dungeon(&mut party, &mut dungeon, &SimConfig::default(), &mut ScriptedSource::with_rolls(vec![1]));
        RunRecord::new(w, &party, &dungeon).unwrap()
    }

    fn lines(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn escape_quotes_when_needed() {
        assert_eq!(escape("Goblins"), "Goblins");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn create_writes_headers_then_rows() {
        let dir = tempfile::tempdir().unwrap();
        let w = world();
        let mut writer = RecordWriter::create(dir.path(), &w).unwrap();
        writer.append(&record(&w)).unwrap();
        writer.append(&record(&w)).unwrap();
        writer.flush().unwrap();
        assert_eq!(writer.rows(), 2);

        let basic = lines(&writer.basic_path());
        assert_eq!(basic.len(), 3);
        assert!(basic[0].starts_with("Dungeon Name,Adventurer 1 Class,Adventurer 1 Level"));
        assert!(basic[0].ends_with("Threat Level,# Encounters,# Encounters Beaten,Victory?,Defeated By"));
        assert!(basic[1].starts_with("Scripted Dungeon,Fighter,2,Ranger,2,Mage,2,Cleric,2,Goblins,Riddle Door,"));
        assert!(basic[1].ends_with(",2,2,1,"));

        let extended = lines(&writer.extended_path());
        assert_eq!(extended.len(), 3);
        assert_eq!(extended[0].split(',').count(), extended_headers(&w).len());
        assert_eq!(extended[1].split(',').count(), extended_headers(&w).len());
    }

    #[test]
    fn create_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let w = world();
        {
            let mut writer = RecordWriter::create(dir.path(), &w).unwrap();
            writer.append(&record(&w)).unwrap();
            writer.flush().unwrap();
        }
        let mut writer = RecordWriter::create(dir.path(), &w).unwrap();
        writer.flush().unwrap();
        assert_eq!(lines(&writer.basic_path()).len(), 1);
    }

    #[test]
    fn append_writes_headers_once() {
        let dir = tempfile::tempdir().unwrap();
        let w = world();
        for _ in 0..3 {
            let mut writer = RecordWriter::append_to(dir.path(), &w).unwrap();
            writer.append(&record(&w)).unwrap();
            writer.flush().unwrap();
        }
        let basic = lines(&dir.path().join(BASIC_FILE));
        assert_eq!(basic.len(), 4);
        assert_eq!(basic.iter().filter(|l| l.starts_with("Dungeon Name")).count(), 1);
        let extended = lines(&dir.path().join(EXTENDED_FILE));
        assert_eq!(extended.len(), 4);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = RecordWriter::create(&missing, &world()).unwrap_err();
        assert!(matches!(err, crate::error::SimError::Io(_)));
    }
}
