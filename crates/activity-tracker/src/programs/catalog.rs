use super::domain::{CategoryEntry, Program, ProgramCategory};

/// Static category → program → specialization reference data.
///
/// Lookups are deliberately permissive: unknown categories or programs yield empty slices
/// rather than errors so UI filters can pass whatever the user picked. Strict checks live in
/// [`super::ProgramSelectionValidator`].
#[derive(Debug)]
pub struct ProgramCatalog {
    entries: Vec<(ProgramCategory, Vec<Program>)>,
}

impl ProgramCatalog {
    pub fn standard() -> Self {
        Self {
            entries: ProgramCategory::ordered()
                .into_iter()
                .map(|category| (category, standard_programs(category)))
                .collect(),
        }
    }

    pub fn categories(&self) -> Vec<CategoryEntry> {
        self.entries
            .iter()
            .map(|(category, _)| CategoryEntry::from(*category))
            .collect()
    }

    /// Programs for a category given either its key or its display value.
    pub fn programs_for(&self, category: &str) -> &[Program] {
        match ProgramCategory::resolve(category) {
            Some(category) => self.programs_in(category),
            None => &[],
        }
    }

    pub fn programs_in(&self, category: ProgramCategory) -> &[Program] {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == category)
            .map(|(_, programs)| programs.as_slice())
            .unwrap_or(&[])
    }

    pub fn program(&self, category: ProgramCategory, degree_code: &str) -> Option<&Program> {
        let degree_code = degree_code.trim();
        self.programs_in(category)
            .iter()
            .find(|program| program.degree_code == degree_code)
    }

    pub fn specializations_for(&self, category: &str, degree_code: &str) -> &[&'static str] {
        ProgramCategory::resolve(category)
            .and_then(|category| self.program(category, degree_code))
            .map(|program| program.specializations.as_slice())
            .unwrap_or(&[])
    }
}

fn program(
    degree_code: &'static str,
    name: &'static str,
    duration_years: u8,
    lateral_entry: bool,
    specializations: &[&'static str],
) -> Program {
    Program {
        degree_code,
        name,
        duration_years,
        lateral_entry,
        specializations: specializations.to_vec(),
    }
}

fn standard_programs(category: ProgramCategory) -> Vec<Program> {
    match category {
        ProgramCategory::Engineering => vec![
            program(
                "B.Tech",
                "Bachelor of Technology",
                4,
                true,
                &[
                    "Computer Science & Engineering",
                    "Artificial Intelligence & Machine Learning",
                    "Data Science",
                    "Cyber Security",
                    "Electronics & Communication Engineering",
                    "Electrical & Electronics Engineering",
                    "Mechanical Engineering",
                    "Civil Engineering",
                    "Robotics & Automation",
                    "Biotechnology",
                ],
            ),
            program(
                "M.Tech",
                "Master of Technology",
                2,
                false,
                &[
                    "Computer Science & Engineering",
                    "VLSI Design",
                    "Structural Engineering",
                    "Power Systems",
                    "Thermal Engineering",
                ],
            ),
            program(
                "Diploma",
                "Diploma in Engineering",
                3,
                false,
                &[
                    "Computer Engineering",
                    "Mechanical Engineering",
                    "Civil Engineering",
                    "Electrical Engineering",
                ],
            ),
        ],
        ProgramCategory::ComputerApplications => vec![
            program(
                "BCA",
                "Bachelor of Computer Applications",
                3,
                false,
                &[
                    "Data Science & Analytics",
                    "Cloud Computing",
                    "Cyber Security",
                    "Full Stack Development",
                ],
            ),
            program(
                "MCA",
                "Master of Computer Applications",
                2,
                true,
                &["Artificial Intelligence", "Data Science", "Cloud Computing"],
            ),
        ],
        ProgramCategory::Science => vec![
            program(
                "B.Sc",
                "Bachelor of Science",
                3,
                false,
                &[
                    "Physics",
                    "Chemistry",
                    "Mathematics",
                    "Computer Science",
                    "Biotechnology",
                    "Microbiology",
                ],
            ),
            program(
                "M.Sc",
                "Master of Science",
                2,
                false,
                &["Physics", "Chemistry", "Mathematics", "Data Science"],
            ),
        ],
        ProgramCategory::Management => vec![
            program(
                "BBA",
                "Bachelor of Business Administration",
                3,
                false,
                &[
                    "Finance",
                    "Marketing",
                    "Human Resource Management",
                    "Business Analytics",
                ],
            ),
            program(
                "MBA",
                "Master of Business Administration",
                2,
                false,
                &[
                    "Finance",
                    "Marketing",
                    "Human Resource Management",
                    "Operations",
                    "Business Analytics",
                ],
            ),
            program("B.Com", "Bachelor of Commerce", 3, false, &[]),
        ],
        ProgramCategory::Arts => vec![
            program(
                "B.A.",
                "Bachelor of Arts",
                3,
                false,
                &[
                    "English",
                    "Economics",
                    "Psychology",
                    "Political Science",
                    "Journalism & Mass Communication",
                ],
            ),
            program(
                "M.A.",
                "Master of Arts",
                2,
                false,
                &["English", "Economics", "Psychology"],
            ),
        ],
        ProgramCategory::Pharmacy => vec![
            program("B.Pharm", "Bachelor of Pharmacy", 4, true, &[]),
            program("D.Pharm", "Diploma in Pharmacy", 2, false, &[]),
            program(
                "M.Pharm",
                "Master of Pharmacy",
                2,
                false,
                &["Pharmaceutics", "Pharmacology", "Pharmaceutical Chemistry"],
            ),
        ],
        ProgramCategory::Law => vec![
            program("LL.B.", "Bachelor of Laws", 3, false, &[]),
            program("B.A. LL.B.", "Integrated Bachelor of Arts and Laws", 5, false, &[]),
            program(
                "LL.M.",
                "Master of Laws",
                1,
                false,
                &["Corporate Law", "Criminal Law", "Constitutional Law"],
            ),
        ],
        ProgramCategory::Design => vec![
            program(
                "B.Des",
                "Bachelor of Design",
                4,
                false,
                &[
                    "Fashion Design",
                    "Interior Design",
                    "Communication Design",
                    "Product Design",
                ],
            ),
            program("B.Arch", "Bachelor of Architecture", 5, false, &[]),
        ],
        ProgramCategory::Doctoral => vec![program(
            "Ph.D.",
            "Doctor of Philosophy",
            3,
            false,
            &[
                "Engineering",
                "Computer Science",
                "Sciences",
                "Management",
                "Humanities",
                "Pharmaceutical Sciences",
                "Law",
            ],
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn categories_are_ordered_and_unique() {
        let catalog = ProgramCatalog::standard();
        let categories = catalog.categories();
        assert!(!categories.is_empty());
        assert_eq!(categories[0].key, "ENGINEERING");
        assert_eq!(categories[0].value, "Engineering & Technology");
        assert_eq!(categories.last().map(|entry| entry.key), Some("PHD"));

        let keys: HashSet<_> = categories.iter().map(|entry| entry.key).collect();
        assert_eq!(keys.len(), categories.len());
    }

    #[test]
    fn every_category_offers_programs_with_unique_codes() {
        let catalog = ProgramCatalog::standard();
        for category in ProgramCategory::ordered() {
            let programs = catalog.programs_in(category);
            assert!(!programs.is_empty(), "{category} has no programs");
            let codes: HashSet<_> = programs.iter().map(|program| program.degree_code).collect();
            assert_eq!(codes.len(), programs.len(), "duplicate code in {category}");
        }
    }

    #[test]
    fn programs_for_accepts_key_or_display_value() {
        let catalog = ProgramCatalog::standard();
        let by_key = catalog.programs_for("ENGINEERING");
        let by_value = catalog.programs_for("Engineering & Technology");
        assert_eq!(by_key, by_value);
        assert_eq!(by_key[0].degree_code, "B.Tech");
    }

    #[test]
    fn unknown_lookups_degrade_to_empty() {
        let catalog = ProgramCatalog::standard();
        assert!(catalog.programs_for("nonexistent-category").is_empty());
        assert!(catalog.programs_for("").is_empty());
        assert!(catalog
            .specializations_for("nonexistent-category", "B.Tech")
            .is_empty());
        assert!(catalog
            .specializations_for("ENGINEERING", "B.Basket")
            .is_empty());
    }

    #[test]
    fn specializations_follow_program() {
        let catalog = ProgramCatalog::standard();
        let specializations = catalog.specializations_for("Engineering & Technology", "B.Tech");
        assert!(specializations.contains(&"Robotics & Automation"));
        assert!(catalog.specializations_for("LAW", "LL.B.").is_empty());
    }
}
