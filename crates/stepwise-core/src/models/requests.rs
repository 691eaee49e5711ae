//! Request types for creating and editing models.

/// Step content as submitted by a create or edit form.
///
/// Creation reads `name`, `notes` and `theory`; editing reads every field.
/// `notebook` marks the theory as notebook content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepData {
    pub name: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub theory: Option<String>,
    pub video_url: Option<String>,
    pub notebook: bool,
}

impl StepData {
    /// Step data with only a name set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stepwise_core::models::StepData;
    ///
    /// let data = StepData::named("Variables").with_theory("let x = 1;").notebook();
    /// assert_eq!(data.name, "Variables");
    /// assert!(data.notebook);
    /// ```
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_theory(mut self, theory: impl Into<String>) -> Self {
        self.theory = Some(theory.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn notebook(mut self) -> Self {
        self.notebook = true;
        self
    }
}

impl TryFrom<crate::params::CreateStep> for StepData {
    type Error = crate::CurriculumError;

    fn try_from(params: crate::params::CreateStep) -> Result<Self, Self::Error> {
        params.validate()?;

        Ok(Self {
            name: params.name,
            description: None,
            notes: params.notes,
            theory: params.theory,
            video_url: None,
            notebook: params.notebook,
        })
    }
}

impl TryFrom<crate::params::EditStep> for StepData {
    type Error = crate::CurriculumError;

    /// Convert EditStep parameters into validated step data.
    fn try_from(params: crate::params::EditStep) -> Result<Self, Self::Error> {
        params.validate()?;

        Ok(Self {
            name: params.name,
            description: params.description,
            notes: params.notes,
            theory: params.theory,
            video_url: params.video_url,
            notebook: params.notebook,
        })
    }
}
