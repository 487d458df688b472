use std::io::{BufReader, Write};

use anyhow::Result;
use cap_std::fs::Dir;
use serde_json::{from_reader, to_vec};

use crate::contact::Contact;

/// The authoritative in-memory contact list of the running service.
///
/// Mirrored to the `contacts` file as a JSON array after every mutation, so
/// the next start picks up the latest edits. All writes go through
/// [`Store::apply`].
pub struct Store {
    contacts: Vec<Contact>,
}

/// The one well-defined entry point per mutation type.
#[derive(Debug)]
pub enum Mutation {
    Add(Contact),
    Update {
        internal_number: String,
        contact: Contact,
    },
    Delete {
        internal_number: String,
    },
    Replace(Vec<Contact>),
}

impl Store {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }

    /// Reads the persisted list, empty if none was written yet.
    pub fn read(dir: &Dir) -> Result<Vec<Contact>> {
        let val = if let Ok(file) = dir.open("contacts") {
            from_reader(BufReader::new(file))?
        } else {
            Vec::new()
        };

        Ok(val)
    }

    pub fn write(&self, dir: &Dir) -> Result<()> {
        let buf = to_vec(&self.contacts)?;

        let mut file = dir.create("contacts.new")?;
        file.write_all(&buf)?;
        dir.rename("contacts.new", dir, "contacts")?;

        Ok(())
    }

    /// Storage failures must not take down the directory, the in-memory list
    /// stays authoritative for the session.
    pub fn persist(&self, dir: &Dir) {
        if let Err(err) = self.write(dir) {
            tracing::warn!("Failed to persist contacts: {:#}", err);
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn into_contacts(self) -> Vec<Contact> {
        self.contacts
    }

    /// Returns whether the mutation changed the list. Update and delete
    /// target the first record with the given internal number in list order,
    /// duplicates beyond it are left alone.
    pub fn apply(&mut self, mutation: Mutation) -> bool {
        match mutation {
            Mutation::Add(contact) => {
                self.contacts.push(contact);

                true
            }
            Mutation::Update {
                internal_number,
                contact,
            } => match self
                .contacts
                .iter_mut()
                .find(|contact| contact.internal_number == internal_number)
            {
                Some(val) => {
                    *val = contact;

                    true
                }
                None => false,
            },
            Mutation::Delete { internal_number } => match self
                .contacts
                .iter()
                .position(|contact| contact.internal_number == internal_number)
            {
                Some(index) => {
                    self.contacts.remove(index);

                    true
                }
                None => false,
            },
            Mutation::Replace(contacts) => {
                self.contacts = contacts;

                true
            }
        }
    }

    /// Case-insensitive substring filter backing the main view and the
    /// edit and delete pickers.
    pub fn search(&self, query: &str) -> Vec<Contact> {
        let query = query.to_lowercase();

        self.contacts
            .iter()
            .filter(|contact| contact.matches(&query))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    use std::env::temp_dir;
    use std::fs::{create_dir_all, remove_dir_all};
    use std::process::id;

    use cap_std::ambient_authority;

    pub fn data_dir(name: &str) -> Dir {
        let path = temp_dir().join(format!("contact-directory-{}-{}", name, id()));

        let _ = remove_dir_all(&path);
        create_dir_all(&path).unwrap();

        Dir::open_ambient_dir(path, ambient_authority()).unwrap()
    }

    fn contact(first_name: &str, internal_number: &str, function: &str) -> Contact {
        Contact {
            first_name: first_name.to_owned(),
            internal_number: internal_number.to_owned(),
            function: function.to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn delete_removes_first_match_only() {
        let mut store = Store::new(vec![
            contact("John", "1001", ""),
            contact("Jane", "1001", ""),
            contact("Jim", "1002", ""),
        ]);

        assert!(store.apply(Mutation::Delete {
            internal_number: "1001".to_owned(),
        }));

        assert_eq!(store.contacts().len(), 2);
        assert_eq!(store.contacts()[0].first_name, "Jane");

        assert!(!store.apply(Mutation::Delete {
            internal_number: "4711".to_owned(),
        }));
    }

    #[test]
    fn update_replaces_first_match_in_place() {
        let mut store = Store::new(vec![
            contact("John", "1001", "Manager"),
            contact("Jane", "1002", ""),
        ]);

        assert!(store.apply(Mutation::Update {
            internal_number: "1001".to_owned(),
            contact: contact("Johnny", "1003", "Manager"),
        }));

        assert_eq!(store.contacts()[0].first_name, "Johnny");
        assert_eq!(store.contacts()[0].internal_number, "1003");
        assert_eq!(store.contacts()[1].first_name, "Jane");
    }

    #[test]
    fn replace_swaps_the_whole_list() {
        let mut store = Store::new(vec![contact("John", "1001", "")]);

        store.apply(Mutation::Replace(vec![
            contact("Jane", "1002", ""),
            contact("Jim", "1003", ""),
        ]));

        assert_eq!(store.contacts().len(), 2);
        assert_eq!(store.contacts()[0].first_name, "Jane");
    }

    #[test]
    fn search_is_case_insensitive_and_exact_on_extension() {
        let store = Store::new(vec![
            contact("John", "1001", "Manager"),
            contact("Jane", "1002", "Developer"),
            contact("Jim", "1003", ""),
        ]);

        let results = store.search("manager");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].first_name, "John");

        let results = store.search("1002");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].first_name, "Jane");

        assert_eq!(store.search("").len(), 3);
    }

    #[test]
    fn mutations_survive_write_and_read() {
        let dir = data_dir("store-roundtrip");

        let mut store = Store::new(vec![
            contact("John", "1001", "Manager"),
            contact("Jane", "1002", ""),
        ]);

        store.apply(Mutation::Delete {
            internal_number: "1001".to_owned(),
        });
        store.write(&dir).unwrap();

        let contacts = Store::read(&dir).unwrap();

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].first_name, "Jane");
    }

    #[test]
    fn read_tolerates_missing_file() {
        let dir = data_dir("store-missing");

        assert!(Store::read(&dir).unwrap().is_empty());
    }
}
