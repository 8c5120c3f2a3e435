//! Built-in stubs and project overrides
//!
//! Each generated artifact comes from one stub. A project can replace any of them
//! by placing `<kind>.stub` in its stubs directory (`app/Stubs` by default); the
//! rest fall back to the built-in texts below.

use super::store::{FileStore, StoreResult};
use super::templates::Template;
use std::fmt;
use std::path::Path;

/// Eloquent model
pub const MODEL_STUB: &str = r"<?php

namespace {{namespace}};

use Illuminate\Database\Eloquent\Model;

class {{class}} extends Model
{
    /**
     * The database table used by the model.
     *
     * @var string
     */
    protected $table = '{{table}}';

    /**
     * The attributes that are mass assignable.
     *
     * @var array
     */
    protected $fillable = {{fillable}};

    /**
     * The attributes excluded from the model's JSON form.
     *
     * @var array
     */
    protected $hidden = {{hidden}};

    /**
     * The attribute definitions the migration was generated from.
     *
     * @return array
     */
    public function migrationAttributes()
    {
        return {{migrationAttributes}};
    }
}
";

/// Schema migration
pub const MIGRATION_STUB: &str = r"<?php

use Illuminate\Database\Schema\Blueprint;
use Illuminate\Database\Migrations\Migration;

class {{migrationClass}} extends Migration
{
    /**
     * Run the migrations.
     *
     * @return void
     */
    public function up()
    {
        Schema::create('{{table}}', function (Blueprint $table) {
            $table->increments('id');
            {{columns}}
            $table->timestamps();
        });
    }

    /**
     * Reverse the migrations.
     *
     * @return void
     */
    public function down()
    {
        Schema::drop('{{table}}');
    }
}
";

/// Resource controller
pub const CONTROLLER_STUB: &str = r"<?php

namespace {{namespace}}\Http\Controllers;

use {{namespace}}\{{class}};
use Illuminate\Http\Request;

class {{controller}} extends Controller
{
    /**
     * Display a listing of the resource.
     *
     * @return \Illuminate\Http\Response
     */
    public function index()
    {
        return {{class}}::all();
    }

    /**
     * Show the form for creating a new resource.
     *
     * @return \Illuminate\Http\Response
     */
    public function create()
    {
        return view('{{route}}.create');
    }

    /**
     * Store a newly created resource in storage.
     *
     * @param  \Illuminate\Http\Request  $request
     * @return \Illuminate\Http\Response
     */
    public function store(Request $request)
    {
        ${{instance}} = {{class}}::create($request->all());

        return redirect()->route('{{route}}.show', ${{instance}}->id);
    }

    /**
     * Display the specified resource.
     *
     * @param  int  $id
     * @return \Illuminate\Http\Response
     */
    public function show($id)
    {
        return {{class}}::findOrFail($id);
    }

    /**
     * Show the form for editing the specified resource.
     *
     * @param  int  $id
     * @return \Illuminate\Http\Response
     */
    public function edit($id)
    {
        ${{instance}} = {{class}}::findOrFail($id);

        return view('{{route}}.edit', compact('{{instance}}'));
    }

    /**
     * Update the specified resource in storage.
     *
     * @param  \Illuminate\Http\Request  $request
     * @param  int  $id
     * @return \Illuminate\Http\Response
     */
    public function update(Request $request, $id)
    {
        ${{instance}} = {{class}}::findOrFail($id);
        ${{instance}}->update($request->all());

        return redirect()->route('{{route}}.show', ${{instance}}->id);
    }

    /**
     * Remove the specified resource from storage.
     *
     * @param  int  $id
     * @return \Illuminate\Http\Response
     */
    public function destroy($id)
    {
        {{class}}::destroy($id);

        return redirect()->route('{{route}}.index');
    }
}
";

/// Block appended to the routes file
pub const ROUTES_STUB: &str = r"
/*
|--------------------------------------------------------------------------
| {{class}} Routes
|--------------------------------------------------------------------------
*/
Route::resource('{{route}}', '{{controller}}');
";

/// Block appended to the model factory file
pub const FACTORY_STUB: &str = r"
$factory->define({{namespace}}\{{class}}::class, function (Faker\Generator $faker) {
    return [
{{factoryFields}}
    ];
});
";

/// The kinds of stub the generator renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StubKind {
    /// Model class
    Model,
    /// Migration class
    Migration,
    /// Controller class
    Controller,
    /// Route block
    Routes,
    /// Factory block
    Factory,
}

impl StubKind {
    /// Every stub kind
    pub const ALL: [Self; 5] = [
        Self::Model,
        Self::Migration,
        Self::Controller,
        Self::Routes,
        Self::Factory,
    ];

    /// Stub name, also the override file stem
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Migration => "migration",
            Self::Controller => "controller",
            Self::Routes => "routes",
            Self::Factory => "factory",
        }
    }

    /// Built-in stub text
    #[must_use]
    pub const fn builtin(self) -> &'static str {
        match self {
            Self::Model => MODEL_STUB,
            Self::Migration => MIGRATION_STUB,
            Self::Controller => CONTROLLER_STUB,
            Self::Routes => ROUTES_STUB,
            Self::Factory => FACTORY_STUB,
        }
    }

    /// Override file name (`model.stub`)
    #[must_use]
    pub fn file_name(self) -> String {
        format!("{}.stub", self.name())
    }
}

impl fmt::Display for StubKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The five templates used for one run
#[derive(Debug, Clone)]
pub struct StubSet {
    model: Template,
    migration: Template,
    controller: Template,
    routes: Template,
    factory: Template,
}

impl Default for StubSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl StubSet {
    /// The built-in stubs
    #[must_use]
    pub fn builtin() -> Self {
        let template = |kind: StubKind| Template::new(kind.name(), kind.builtin());
        Self {
            model: template(StubKind::Model),
            migration: template(StubKind::Migration),
            controller: template(StubKind::Controller),
            routes: template(StubKind::Routes),
            factory: template(StubKind::Factory),
        }
    }

    /// Load stubs, preferring `<stubs_dir>/<kind>.stub` files found in `store`
    ///
    /// # Errors
    ///
    /// Returns an error if an override file exists but cannot be read.
    pub fn load(store: &dyn FileStore, stubs_dir: &Path) -> StoreResult<Self> {
        let mut set = Self::builtin();
        for kind in StubKind::ALL {
            let path = stubs_dir.join(kind.file_name());
            if store.exists(&path) {
                tracing::debug!(stub = %kind, path = %path.display(), "using project stub");
                let text = store.read(&path)?;
                *set.get_mut(kind) = Template::new(kind.name(), text);
            }
        }
        Ok(set)
    }

    /// Template for `kind`
    #[must_use]
    pub const fn get(&self, kind: StubKind) -> &Template {
        match kind {
            StubKind::Model => &self.model,
            StubKind::Migration => &self.migration,
            StubKind::Controller => &self.controller,
            StubKind::Routes => &self.routes,
            StubKind::Factory => &self.factory,
        }
    }

    fn get_mut(&mut self, kind: StubKind) -> &mut Template {
        match kind {
            StubKind::Model => &mut self.model,
            StubKind::Migration => &mut self.migration,
            StubKind::Controller => &mut self.controller,
            StubKind::Routes => &mut self.routes,
            StubKind::Factory => &mut self.factory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaffold::store::MemoryFileStore;
    use crate::scaffold::templates::Slot;

    #[test]
    fn test_builtin_slots() {
        let stubs = StubSet::builtin();
        assert_eq!(
            stubs.get(StubKind::Model).slots(),
            vec![
                Slot::Namespace,
                Slot::Class,
                Slot::Table,
                Slot::Fillable,
                Slot::Hidden,
                Slot::MigrationAttributes,
            ]
        );
        assert_eq!(
            stubs.get(StubKind::Migration).slots(),
            vec![Slot::MigrationClass, Slot::Table, Slot::Columns]
        );
        assert_eq!(
            stubs.get(StubKind::Routes).slots(),
            vec![Slot::Class, Slot::Route, Slot::Controller]
        );
    }

    #[test]
    fn test_migration_stub_shape() {
        assert!(MIGRATION_STUB.contains("class {{migrationClass}} extends Migration"));
        assert!(MIGRATION_STUB.contains("Schema::create('{{table}}', function (Blueprint $table) {"));
        assert!(MIGRATION_STUB.contains("Schema::drop('{{table}}');"));
    }

    #[test]
    fn test_project_override() {
        let store = MemoryFileStore::new().with_file("app/Stubs/model.stub", "class {{class}} {}");
        let stubs = StubSet::load(&store, Path::new("app/Stubs")).unwrap();

        assert_eq!(stubs.get(StubKind::Model).text(), "class {{class}} {}");
        assert_eq!(stubs.get(StubKind::Migration).text(), MIGRATION_STUB);
    }

    #[test]
    fn test_missing_stub_dir_uses_builtin() {
        let store = MemoryFileStore::new();
        let stubs = StubSet::load(&store, Path::new("app/Stubs")).unwrap();
        for kind in StubKind::ALL {
            assert_eq!(stubs.get(kind).text(), kind.builtin());
        }
    }
}
