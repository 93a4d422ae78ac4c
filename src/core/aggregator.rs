use crate::domain::model::{Category, CategoryMaps, Record};

impl CategoryMaps {
    /// Groups records by zone ID within each category.
    pub fn aggregate<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut maps = Self::default();
        for record in records {
            maps.add(record);
        }
        maps
    }

    /// Every record lands in the express map; standard or expedited
    /// records also land in exactly one of those.
    pub fn add(&mut self, record: &Record) {
        self.express.insert(record.express_zone(), record.name());

        if let Some((category, zone)) = record.secondary() {
            self.get_mut(category).insert(zone, record.name());
        }
    }

    pub fn zone_counts(&self) -> [(Category, usize); 3] {
        Category::ALL.map(|category| (category, self.get(category).zone_count()))
    }
}
